use alloc::boxed::Box;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Set

/// A collection of unique values.
pub trait Set: Reflect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns an iterator over the elements, in the set's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Removes every element.
    fn clear(&mut self);

    /// Inserts a value. Returns `Ok(false)` if an equal value was present.
    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>>;

    /// Returns `true` if the set holds no element.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
