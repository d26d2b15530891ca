use crate::rbtree::{Color, Link, Tree};
use std::collections::VecDeque;
use std::fmt;

/// Ascending walk yielding each value with its color.
pub struct InOrder<'a, T: Ord> {
    tree: &'a Tree<T>,
    next: Link,
}

/// Breadth-first walk from the root yielding each value with its color.
pub struct LevelOrder<'a, T: Ord> {
    tree: &'a Tree<T>,
    queue: VecDeque<usize>,
}

pub struct Iter<'a, T: Ord> {
    inner: InOrder<'a, T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Annotate {
    #[default]
    Plain,
    Colored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    In,
    Level,
}

/// Bracketed, comma separated rendering of a traversal.
pub struct Listing<'a, T: Ord> {
    tree: &'a Tree<T>,
    order: Order,
    annotate: Annotate,
}

impl<T: Ord> Tree<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.in_order(),
        }
    }

    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder {
            tree: self,
            next: self.first(),
        }
    }

    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            tree: self,
            queue: self.root.into_iter().collect(),
        }
    }

    pub fn in_order_listing(&self, annotate: Annotate) -> Listing<'_, T> {
        Listing {
            tree: self,
            order: Order::In,
            annotate,
        }
    }

    pub fn level_order_listing(&self, annotate: Annotate) -> Listing<'_, T> {
        Listing {
            tree: self,
            order: Order::Level,
            annotate,
        }
    }

    fn first(&self) -> Link {
        let mut cur = self.root?;
        while let Some(left) = self.nodes[cur].left {
            cur = left;
        }
        Some(cur)
    }

    fn after(&self, idx: usize) -> Link {
        self.after_sub(idx).or_else(|| self.after_above(idx))
    }

    fn after_sub(&self, idx: usize) -> Link {
        let mut cur = self.nodes[idx].right?;
        while let Some(left) = self.nodes[cur].left {
            cur = left;
        }
        Some(cur)
    }

    fn after_above(&self, idx: usize) -> Link {
        let mut cur = idx;
        while let Some(parent) = self.nodes[cur].parent {
            if self.nodes[parent].right == Some(cur) {
                cur = parent;
            } else {
                return Some(parent);
            }
        }
        None
    }
}

impl<'a, T: Ord> Iterator for InOrder<'a, T> {
    type Item = (&'a T, Color);
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next.map(|idx| {
            self.next = tree.after(idx);
            let node = &tree.nodes[idx];
            (&node.value, node.color)
        })
    }
}

impl<'a, T: Ord> Iterator for LevelOrder<'a, T> {
    type Item = (&'a T, Color);
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let idx = self.queue.pop_front()?;
        let node = &tree.nodes[idx];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some((&node.value, node.color))
    }
}

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }
}

impl<'a, T: Ord> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Box<dyn Iterator<Item = (&T, Color)> + '_> = match self.order {
            Order::In => Box::new(self.tree.in_order()),
            Order::Level => Box::new(self.tree.level_order()),
        };
        f.write_str("[")?;
        for (i, (value, color)) in entries.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.annotate {
                Annotate::Plain => write!(f, "{value}")?,
                Annotate::Colored => write!(f, "{value}({color})")?,
            }
        }
        f.write_str("]")
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level order: {}\nin order: {}",
            self.level_order_listing(Annotate::Plain),
            self.in_order_listing(Annotate::Plain)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SortedCollection;

    fn tree_of(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for &v in values {
            tree.insert(v).unwrap();
        }
        tree
    }

    #[test]
    fn empty_listings() {
        let tree = Tree::<i32>::new();
        assert_eq!(tree.in_order_listing(Annotate::Colored).to_string(), "[]");
        assert_eq!(tree.to_string(), "level order: []\nin order: []");
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn same_side_listings() {
        let tree = tree_of(&[20, 10, 30, 40, 50]);
        assert_eq!(
            tree.level_order_listing(Annotate::Colored).to_string(),
            "[20(BLACK), 10(BLACK), 40(BLACK), 30(RED), 50(RED)]"
        );
        assert_eq!(
            tree.in_order_listing(Annotate::Colored).to_string(),
            "[10(BLACK), 20(BLACK), 30(RED), 40(BLACK), 50(RED)]"
        );
    }

    #[test]
    fn opposite_side_listings() {
        let tree = tree_of(&[20, 10, 30, 50, 40]);
        assert_eq!(
            tree.level_order_listing(Annotate::Colored).to_string(),
            "[20(BLACK), 10(BLACK), 40(BLACK), 30(RED), 50(RED)]"
        );
        assert_eq!(
            tree.in_order_listing(Annotate::Colored).to_string(),
            "[10(BLACK), 20(BLACK), 30(RED), 40(BLACK), 50(RED)]"
        );
    }

    #[test]
    fn red_uncle_listings() {
        let tree = tree_of(&[40, 20, 60, 80]);
        assert_eq!(
            tree.level_order_listing(Annotate::Colored).to_string(),
            "[40(BLACK), 20(BLACK), 60(BLACK), 80(RED)]"
        );
        assert_eq!(
            tree.in_order_listing(Annotate::Colored).to_string(),
            "[20(BLACK), 40(BLACK), 60(BLACK), 80(RED)]"
        );
    }

    #[test]
    fn plain_display() {
        let tree = tree_of(&[40, 20, 60, 80]);
        assert_eq!(tree.to_string(), "level order: [40, 20, 60, 80]\nin order: [20, 40, 60, 80]");
    }

    #[test]
    fn iter_asc() {
        let tree = tree_of(&(0..10).collect::<Vec<_>>());
        let mut iter = tree.iter();
        for i in 0..10 {
            assert_eq!(iter.next(), Some(&i));
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_desc() {
        let tree = tree_of(&(0..10).rev().collect::<Vec<_>>());
        let mut iter = tree.iter();
        for i in 0..10 {
            assert_eq!(iter.next(), Some(&i));
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn ref_into_iter() {
        let tree = tree_of(&[3, 1, 2]);
        let mut seen = Vec::new();
        for value in &tree {
            seen.push(*value);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn level_order_after_remove() {
        let mut tree = tree_of(&[20, 10, 30, 40, 50]);
        tree.remove(&20).unwrap();
        assert_eq!(tree.level_order_listing(Annotate::Plain).to_string(), "[30, 10, 40, 50]");
    }
}
