use alloc::vec::Vec;
use core::ops::Deref;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// TypeParamInfo

/// Information about one generic type parameter.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::Typed;
/// use std::collections::BTreeMap;
///
/// let generics = <BTreeMap<String, u8>>::type_info().generics();
/// assert_eq!(generics[0].name(), "K");
/// assert!(generics[1].type_is::<u8>());
/// ```
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    ty: Type,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
}

impl TypeParamInfo {
    impl_type_fn!(ty);

    /// Creates the info of parameter `name` instantiated with `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty: Type::of::<T>(),
            name,
            type_info: T::type_info,
        }
    }

    /// Returns the parameter name as declared, e.g. `T`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeInfo`] of the type argument.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// Generics

/// The generic type parameters of a type, in declaration order.
///
/// Empty for non-generic types.
#[derive(Clone, Debug, Default)]
pub struct Generics(Vec<TypeParamInfo>);

impl Generics {
    pub(crate) const EMPTY: Self = Self(Vec::new());

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a list from parameter infos, keeping their order.
    #[inline]
    pub fn from_params(params: &[TypeParamInfo]) -> Self {
        Self(params.to_vec())
    }

    /// Returns the parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&TypeParamInfo> {
        self.0.iter().find(|info| info.name() == name)
    }
}

impl Deref for Generics {
    type Target = [TypeParamInfo];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
