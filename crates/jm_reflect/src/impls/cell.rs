//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] around one [`TypeInfo`].
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: the `static CELL`
//!   inside a generic function is shared by every instantiation, so these
//!   keep one entry per [`TypeId`] in a [`TypeIdMap`] behind a [`RwLock`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use jm_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage of information for a non-generic type.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Static storage of the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use jm_reflect::impls::NonGenericTypeInfoCell;
/// use jm_reflect::info::{ScalarInfo, TypeInfo, TypePath, Typed};
///
/// struct Celsius(f32);
///
/// impl TypePath for Celsius {
///     fn type_path() -> &'static str { "units::Celsius" }
///     fn type_name() -> &'static str { "Celsius" }
///     fn type_ident() -> &'static str { "Celsius" }
/// }
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Celsius::type_info(), Celsius::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage of information for a generic type, one entry per instantiation.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Static storage of the [`TypeInfo`] of a generic type.
///
/// ```
/// use jm_reflect::impls::GenericTypeInfoCell;
/// use jm_reflect::info::{ScalarInfo, TypeInfo, TypePath, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: TypePath> TypePath for Tagged<T> {
///     fn type_path() -> &'static str { "demo::Tagged" }
///     fn type_name() -> &'static str { "Tagged" }
///     fn type_ident() -> &'static str { "Tagged" }
/// }
///
/// impl<T: TypePath> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
///     }
/// }
///
/// assert!(<Tagged<u8>>::type_info().type_is::<Tagged<u8>>());
/// assert!(<Tagged<i8>>::type_info().type_is::<Tagged<i8>>());
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage of the names of a generic type.
///
/// ```
/// use jm_reflect::impls::{self, GenericTypePathCell};
/// use jm_reflect::info::TypePath;
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["demo::Pair<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["Pair<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Pair" }
/// }
///
/// assert_eq!(<Pair<i32>>::type_path(), "demo::Pair<i32>");
/// assert_eq!(<Pair<String>>::type_name(), "Pair<String>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the entry of type `G`, inserting the result of `f` if there is none.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            // `f` runs without the lock held: building an info may need
            // the info of another instantiation stored in this same cell.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
