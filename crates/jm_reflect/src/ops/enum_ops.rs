use crate::Reflect;

// -----------------------------------------------------------------------------
// Enum

/// Access to the active variant of a field-less enum.
///
/// ```
/// use jm_reflect::{derive::Reflect, ops::Enum};
///
/// #[derive(Reflect)]
/// enum Color { Red, Green }
///
/// assert_eq!(Color::Green.variant_name(), "Green");
/// assert_eq!(Color::Green.variant_index(), 1);
/// ```
pub trait Enum: Reflect {
    /// Returns the name of the active variant.
    fn variant_name(&self) -> &'static str;

    /// Returns the declaration index of the active variant.
    fn variant_index(&self) -> usize;
}
