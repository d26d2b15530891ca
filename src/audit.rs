use crate::rbtree::{Color, Link, Tree};

/// Structural report on a tree, taken by walking every reachable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    pub reachable: usize,
    /// In-order values strictly ascend.
    pub ordered: bool,
    /// Every child's parent link points back at it.
    pub parents_consistent: bool,
    pub root_black: bool,
    /// Number of red nodes with a red parent.
    pub red_red: usize,
    /// Black nodes below the root on every path to an empty slot, or `None`
    /// when paths disagree.
    pub black_height: Option<usize>,
}

impl Audit {
    pub fn is_red_black(&self) -> bool {
        self.ordered
            && self.parents_consistent
            && self.root_black
            && self.red_red == 0
            && self.black_height.is_some()
    }
}

impl<T: Ord> Tree<T> {
    pub fn audit(&self) -> Audit {
        let mut reachable = 0;
        let mut parents_consistent = self.root.is_none_or(|r| self.nodes[r].parent.is_none());
        let mut red_red = 0;

        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                let child_node = &self.nodes[child];
                parents_consistent &= child_node.parent == Some(idx);
                if node.color.is_red() && child_node.color.is_red() {
                    red_red += 1;
                }
                stack.push(child);
            }
        }

        let ordered = self
            .iter()
            .zip(self.iter().skip(1))
            .all(|(a, b)| a < b);

        let root_black = self.root.is_none_or(|r| self.nodes[r].color == Color::Black);
        let black_height = self.black_depth(self.root).map(|depth| match self.root {
            Some(r) if self.nodes[r].color == Color::Black => depth - 1,
            _ => depth,
        });

        Audit {
            reachable,
            ordered,
            parents_consistent,
            root_black,
            red_red,
            black_height,
        }
    }

    /// Black nodes from `link` (inclusive) down to any empty slot.
    fn black_depth(&self, link: Link) -> Option<usize> {
        let Some(idx) = link else {
            return Some(0);
        };
        let node = &self.nodes[idx];
        let left = self.black_depth(node.left)?;
        let right = self.black_depth(node.right)?;
        if left != right {
            return None;
        }
        Some(left + usize::from(node.color == Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SortedCollection;

    #[test]
    fn empty_tree_is_valid() {
        let audit = Tree::<i32>::new().audit();
        assert_eq!(audit.reachable, 0);
        assert_eq!(audit.black_height, Some(0));
        assert!(audit.is_red_black());
    }

    #[test]
    fn small_tree_black_height() {
        let mut tree = Tree::new();
        for v in [20, 10, 30, 40, 50] {
            tree.insert(v).unwrap();
        }
        let audit = tree.audit();
        assert_eq!(audit.reachable, 5);
        assert_eq!(audit.black_height, Some(1));
        assert_eq!(audit.red_red, 0);
        assert!(audit.is_red_black());
    }

    #[test]
    fn detects_red_root_after_remove() {
        let mut tree = Tree::new();
        tree.insert(1).unwrap();
        tree.insert(2).unwrap();
        tree.remove(&1).unwrap();
        let audit = tree.audit();
        assert!(!audit.root_black);
        assert!(!audit.is_red_black());
        assert!(audit.ordered);
    }
}
