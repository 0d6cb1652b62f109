use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{Generics, Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// EnumInfo

/// Type information of a field-less enum.
///
/// # Examples
///
/// ```
/// use jm_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// enum Color { Red, Blue }
///
/// let info = Color::type_info().as_enum().unwrap();
/// assert_eq!(info.variant_names(), ["Red", "Blue"]);
/// assert_eq!(info.index_of("Blue"), Some(1));
///
/// let blue = info.variant(1).unwrap();
/// assert_eq!(blue.take::<Color>().unwrap(), Color::Blue);
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    generics: Generics,
    variants: Box<[&'static str]>,
    factory: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    impl_type_fn!(ty);

    /// Creates a new [`EnumInfo`] with variant names in declaration order.
    ///
    /// `factory` returns the variant at an index.
    #[inline]
    pub fn new<T: TypePath + ?Sized>(
        variants: &[&'static str],
        factory: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            variants: variants.into(),
            factory,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the variant names in declaration order.
    #[inline]
    pub fn variant_names(&self) -> &[&'static str] {
        &self.variants
    }

    /// Returns the number of variants.
    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// Returns the index of the variant with the given name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| *variant == name)
    }

    /// Creates the variant at `index`.
    #[inline]
    pub fn variant(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.factory)(index)
    }
}
