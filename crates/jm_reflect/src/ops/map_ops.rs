use alloc::boxed::Box;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Map

/// A key-value mapping.
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns an iterator over `(key, value)` pairs, in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Inserts an entry, replacing the value of an equal key.
    ///
    /// If either part has the wrong type, both are handed back.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;

    /// Returns `true` if the map holds no entry.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
