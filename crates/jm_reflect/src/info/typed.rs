use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
/// Manual implementations should cache the info in a
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) or a
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell):
///
/// ```
/// use jm_reflect::info::{ScalarInfo, TypeInfo, TypePath, Typed};
/// use jm_reflect::impls::NonGenericTypeInfoCell;
///
/// struct Meters(f64);
///
/// impl TypePath for Meters {
///     fn type_path() -> &'static str { "units::Meters" }
///     fn type_name() -> &'static str { "Meters" }
///     fn type_ident() -> &'static str { "Meters" }
/// }
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
///     }
/// }
///
/// assert_eq!(Meters::type_info().type_name(), "Meters");
/// ```
pub trait Typed: TypePath {
    /// Returns the static type information of `Self`.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// Returns the static type information of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
