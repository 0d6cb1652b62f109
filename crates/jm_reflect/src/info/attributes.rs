use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use jm_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// CustomAttributes

/// A collection of custom attributes attached to a field.
///
/// These are created by `#[reflect(@expr)]` in the
/// [`#[derive(Reflect)]`](crate::derive::Reflect) macro. Attributes are keyed by
/// their concrete type, so a field holds at most one value per attribute type.
///
/// # Example
///
/// ```
/// use jm_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Slider {
///     #[reflect(@10.0f32)]
///     value: f32,
///     name: String,
/// }
///
/// let info = Slider::type_info().as_object().unwrap();
/// let field = info.field("value").unwrap();
/// assert_eq!(field.get_attribute::<f32>(), Some(&10.0));
/// assert!(info.field("name").unwrap().custom_attributes().is_empty());
/// ```
#[derive(Default)]
pub struct CustomAttributes {
    attributes: TypeIdMap<Box<dyn Any + Send + Sync>>,
}

impl CustomAttributes {
    /// A static reference to an empty [`CustomAttributes`].
    pub(crate) const EMPTY: &'static Self = &Self::new();

    /// Creates an empty [`CustomAttributes`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: TypeIdMap::new(),
        }
    }

    /// Adds an attribute, overwriting any earlier value of the same type.
    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.attributes.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.attributes
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns `true` if an attribute of type `T` is present.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.attributes.contains(&TypeId::of::<T>())
    }

    /// Returns the number of stored attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Debug for CustomAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAttributes")
            .field("len", &self.len())
            .finish()
    }
}
