use crate::Reflect;

// -----------------------------------------------------------------------------
// Optional

/// A value that may be absent.
pub trait Optional: Reflect {
    /// Returns the present value.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns the present value mutably.
    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if a value is present.
    #[inline]
    fn is_some(&self) -> bool {
        self.value().is_some()
    }
}
