use alloc::boxed::Box;

use crate::Reflect;

// -----------------------------------------------------------------------------
// List

/// An ordered, growable sequence.
///
/// Element types are checked on insertion; a value of the wrong type is
/// handed back.
pub trait List: Reflect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the element at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns an iterator over the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Removes every element.
    fn clear(&mut self);

    /// Appends an element.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns `true` if the list holds no element.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
