use std::fmt;

/// Failures reported by tree operations. A failed operation never leaves a
/// partial mutation behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// An operation was asked to act on an absent value.
    NullValue,
    /// The value is already stored in the tree.
    DuplicateValue,
    /// The value is not stored in the tree.
    ValueNotFound,
    /// A rotation was requested for two nodes that are not parent and child.
    InvalidRotation,
    /// An in-order successor was requested for a node lacking two children.
    MissingChildren,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NullValue => write!(f, "tree cannot store an absent value"),
            TreeError::DuplicateValue => write!(f, "value already present in tree"),
            TreeError::ValueNotFound => write!(f, "value not in tree"),
            TreeError::InvalidRotation => write!(f, "nodes not related that way"),
            TreeError::MissingChildren => write!(f, "node must have two children"),
        }
    }
}

impl std::error::Error for TreeError {}

pub type Result<T> = std::result::Result<T, TreeError>;
