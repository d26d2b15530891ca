use crate::error::{Result, TreeError};
use crate::tree::SortedCollection;
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;

/// Red-black tree whose nodes live in a single arena. Child links own the
/// structure; parent links are plain indices used to walk upward.
pub struct Tree<T: Ord> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) root: Link,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

pub(crate) type Link = Option<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

impl<T: Ord> SortedCollection<T> for Tree<T> {
    fn insert(&mut self, value: T) -> Result<()> {
        let mut parent = None;
        let mut side = Ordering::Equal;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            side = value.cmp(&node.value);
            parent = cur;
            cur = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Err(TreeError::DuplicateValue),
            };
        }

        let new = self.nodes.len();
        self.nodes.push(Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(new),
            Some(p) if side == Ordering::Less => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
        trace!("linked node {new} under {parent:?}, len {}", self.nodes.len());

        self.enforce_after_insert(new)
    }

    fn remove(&mut self, value: &T) -> Result<T> {
        let target = self.find(value).ok_or(TreeError::ValueNotFound)?;
        let node = &self.nodes[target];
        let doomed = match (node.left, node.right) {
            (Some(_), Some(_)) => {
                // the successor donates its value and is spliced out in its place
                let successor = self.successor(target)?;
                self.swap_values(target, successor);
                self.splice(successor, self.nodes[successor].right);
                successor
            }
            (left, right) => {
                self.splice(target, left.or(right));
                target
            }
        };
        let removed = self.release(doomed);
        trace!("removed node {doomed}, len {}", self.nodes.len());
        Ok(removed.value)
    }

    fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<T: Ord> Tree<T> {
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    pub(crate) fn find(&self, value: &T) -> Link {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            cur = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return cur,
            };
        }
        None
    }

    /// Left-most node of the right subtree of a node with two children.
    fn successor(&self, idx: usize) -> Result<usize> {
        let node = &self.nodes[idx];
        let (Some(_), Some(mut cur)) = (node.left, node.right) else {
            return Err(TreeError::MissingChildren);
        };
        while let Some(left) = self.nodes[cur].left {
            cur = left;
        }
        Ok(cur)
    }

    /// Puts `replacement` into the slot `target` occupies under its parent.
    fn splice(&mut self, target: usize, replacement: Link) {
        let parent = self.nodes[target].parent;
        if let Some(r) = replacement {
            self.nodes[r].parent = parent;
        }
        match parent {
            None => self.root = replacement,
            Some(p) if self.nodes[p].left == Some(target) => self.nodes[p].left = replacement,
            Some(p) => self.nodes[p].right = replacement,
        }
    }

    fn swap_values(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.nodes.split_at_mut(hi);
        std::mem::swap(&mut head[lo].value, &mut tail[0].value);
    }

    /// Drops an unlinked node from the arena. The last node moves into the
    /// freed slot, so every link naming it is redirected.
    fn release(&mut self, idx: usize) -> Node<T> {
        let node = self.nodes.swap_remove(idx);
        let moved = self.nodes.len();
        if idx == moved {
            return node;
        }

        let (parent, left, right) = {
            let n = &self.nodes[idx];
            (n.parent, n.left, n.right)
        };
        match parent {
            None => self.root = Some(idx),
            Some(p) if self.nodes[p].left == Some(moved) => self.nodes[p].left = Some(idx),
            Some(p) => self.nodes[p].right = Some(idx),
        }
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].parent = Some(idx);
        }
        node
    }

    /// Lifts `child` into the position of `parent`. A left child turns
    /// right, a right child turns left. Colors are left alone.
    fn rotate(&mut self, child: usize, parent: usize) -> Result<()> {
        let is_left = self.nodes[parent].left == Some(child);
        if !is_left && self.nodes[parent].right != Some(child) {
            return Err(TreeError::InvalidRotation);
        }

        let grandparent = self.nodes[parent].parent;
        let inner = if is_left {
            let inner = self.nodes[child].right;
            self.nodes[parent].left = inner;
            self.nodes[child].right = Some(parent);
            inner
        } else {
            let inner = self.nodes[child].left;
            self.nodes[parent].right = inner;
            self.nodes[child].left = Some(parent);
            inner
        };
        if let Some(i) = inner {
            self.nodes[i].parent = Some(parent);
        }

        self.nodes[parent].parent = Some(child);
        self.splice_rotated(grandparent, parent, child);
        Ok(())
    }

    fn splice_rotated(&mut self, grandparent: Link, old: usize, new: usize) {
        self.nodes[new].parent = grandparent;
        match grandparent {
            None => self.root = Some(new),
            Some(g) if self.nodes[g].left == Some(old) => self.nodes[g].left = Some(new),
            Some(g) => self.nodes[g].right = Some(new),
        }
    }

    fn enforce_after_insert(&mut self, mut red: usize) -> Result<()> {
        loop {
            let Some(parent) = self.nodes[red].parent else {
                break;
            };
            if !self.nodes[parent].color.is_red() {
                break;
            }
            // a red parent without a parent is the root, recolored below
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let uncle = if self.nodes[grandparent].left == Some(parent) {
                self.nodes[grandparent].right
            } else {
                self.nodes[grandparent].left
            };

            if let Some(u) = uncle.filter(|&u| self.nodes[u].color.is_red()) {
                debug!("red uncle at {u}, recoloring around {grandparent}");
                for idx in [parent, u, grandparent] {
                    self.nodes[idx].color = self.nodes[idx].color.flip();
                }
                red = grandparent;
                continue;
            }

            let same_side = self.is_left_child(red) == self.is_left_child(parent);
            let pivot = if same_side {
                debug!("same-side black uncle, rotating {parent} over {grandparent}");
                parent
            } else {
                debug!("opposite-side black uncle, rotating {red} over {parent} then {grandparent}");
                self.rotate(red, parent)?;
                red
            };

            let pivot_color = self.nodes[pivot].color;
            let grandparent_color = self.nodes[grandparent].color;
            self.rotate(pivot, grandparent)?;
            self.nodes[pivot].color = grandparent_color;
            self.nodes[grandparent].color = pivot_color;
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
        Ok(())
    }

    fn is_left_child(&self, idx: usize) -> bool {
        self.nodes[idx]
            .parent
            .is_some_and(|p| self.nodes[p].left == Some(idx))
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T: fmt::Debug + Ord> fmt::Debug for Tree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("len", &self.nodes.len())
            .field("root", &self.root.map(|r| NodeDebug { tree: self, idx: r }))
            .finish()
    }
}

struct NodeDebug<'a, T: Ord> {
    tree: &'a Tree<T>,
    idx: usize,
}

impl<T: fmt::Debug + Ord> fmt::Debug for NodeDebug<'_, T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.tree.nodes[self.idx];
        let child = |link: Link| link.map(|idx| NodeDebug { tree: self.tree, idx });
        fmt.debug_struct("Node")
            .field("value", &node.value)
            .field("color", &node.color)
            .field("parent", &node.parent.map(|p| &self.tree.nodes[p].value))
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}
