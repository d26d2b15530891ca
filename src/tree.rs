use crate::error::Result;

/// Ordered set of unique values.
pub trait SortedCollection<T> {
    fn insert(&mut self, value: T) -> Result<()>;
    fn remove(&mut self, value: &T) -> Result<T>;
    fn contains(&self, value: &T) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
