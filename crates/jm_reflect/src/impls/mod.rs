//! Reflection for the types the mapping engine knows out of the box, plus the
//! helpers used to implement it.
//!
//! - [`NonGenericTypeInfoCell`], [`GenericTypeInfoCell`], [`GenericTypePathCell`]:
//!   static storage for [`Typed`](crate::info::Typed) and
//!   [`TypePath`](crate::info::TypePath) implementations.
//! - [`concat`]: string concatenation for generic type paths.
//! - [`impl_reflect_scalar!`](crate::impl_reflect_scalar): reflect a leaf value type.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`,
//!   `f32`, `f64`, `String`
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - sets: `BTreeSet<T>`, `HashSet<T>`
//! - maps: `BTreeMap<K, V>`, `HashMap<K, V>`
//! - optional: `Option<T>`
//! - shared: `Arc<RwLock<T>>`
//! - foreign scalars: `chrono::{NaiveDateTime, NaiveDate, DateTime<Utc>}`,
//!   `rust_decimal::Decimal`, `bytes::Bytes`, `http::Uri`, `regex::Regex`

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod foreign;
mod list;
mod map;
mod option;
mod primitives;
mod set;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use jm_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Implement `TypePath` for a generic foreign type.
///
/// Syntax: `(in "module::path") Ident<T, U>`.
macro_rules! impl_type_path {
    ((in $module:literal) $ident:ident < $($param:ident),+ >) => {
        impl<$($param: $crate::info::TypePath),+> $crate::info::TypePath for $ident<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell =
                    $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let params: &[&str] = &[$(<$param as $crate::info::TypePath>::type_path()),+];
                    let params = params.join(", ");
                    $crate::impls::concat(&[$module, "::", stringify!($ident), "<", &params, ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell =
                    $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let params: &[&str] = &[$(<$param as $crate::info::TypePath>::type_name()),+];
                    let params = params.join(", ");
                    $crate::impls::concat(&[stringify!($ident), "<", &params, ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ident)
            }
        }
    };
}

pub(crate) use impl_type_path;

// -----------------------------------------------------------------------------
// impl_reflect_scalar

/// Implements `TypePath`, `Typed` and `Reflect` for a leaf value type.
///
/// The type is reflected as [`ReflectKind::Scalar`](crate::info::ReflectKind).
/// Add `serde` when the type implements `Serialize` and `DeserializeOwned`,
/// so it has a native JSON form; otherwise a converter must handle it.
///
/// ```
/// use jm_reflect::{Reflect, impl_reflect_scalar, info::{ReflectKind, Typed}};
///
/// #[derive(Clone, Debug, PartialEq)]
/// pub struct Celsius(pub f32);
///
/// impl_reflect_scalar!(Celsius);
///
/// let info = Celsius::type_info().as_scalar().unwrap();
/// assert!(!info.has_serde());
/// assert_eq!(Celsius(1.0).reflect_kind(), ReflectKind::Scalar);
/// assert!(Celsius::type_info().type_path().ends_with("::Celsius"));
/// ```
#[macro_export]
macro_rules! impl_reflect_scalar {
    ($ty:ident) => {
        $crate::impl_reflect_scalar!(
            @impl $ty,
            concat!(module_path!(), "::", stringify!($ty)),
            stringify!($ty),
            stringify!($ty),
            $crate::info::ScalarInfo::new::<$ty>()
        );
    };
    ($ty:ident, serde) => {
        $crate::impl_reflect_scalar!(
            @impl $ty,
            concat!(module_path!(), "::", stringify!($ty)),
            stringify!($ty),
            stringify!($ty),
            $crate::info::ScalarInfo::new::<$ty>().with_serde::<$ty>()
        );
    };
    (@impl $ty:ty, $path:expr, $name:expr, $ident:expr, $info:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| $crate::info::TypeInfo::Scalar($info))
            }
        }

        impl $crate::Reflect for $ty {
            fn set(
                &mut self,
                value: $crate::__macro_exports::Box<dyn $crate::Reflect>,
            ) -> ::core::result::Result<(), $crate::__macro_exports::Box<dyn $crate::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> $crate::info::ReflectKind {
                $crate::info::ReflectKind::Scalar
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Scalar(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Scalar(self)
            }
        }
    };
}
