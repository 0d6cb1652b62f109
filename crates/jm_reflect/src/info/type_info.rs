use core::fmt;

use crate::info::{EnumInfo, ListInfo, MapInfo, ObjectInfo, OptionalInfo};
use crate::info::{Generics, ScalarInfo, SetInfo, SharedInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to one view in [`ReflectRef`](crate::ops::ReflectRef)
/// and [`ReflectMut`](crate::ops::ReflectMut), and to one variant of [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Scalar,
    Object,
    Enum,
    List,
    Set,
    Map,
    Optional,
    Shared,
}

impl ReflectKind {
    /// Returns `true` for the kinds that hold elements: lists, sets, maps and optionals.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map | Self::Optional)
    }
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Object => f.pad("Object"),
            Self::Enum => f.pad("Enum"),
            Self::List => f.pad("List"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
            Self::Optional => f.pad("Optional"),
            Self::Shared => f.pad("Shared"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static type information of a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) when the
/// type is known, or [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped)
/// from a `dyn Reflect`.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::{ReflectKind, Typed};
///
/// assert_eq!(i32::type_info().kind(), ReflectKind::Scalar);
/// assert_eq!(<Vec<i32>>::type_info().kind(), ReflectKind::List);
/// assert!(<Vec<i32>>::type_info().as_list().unwrap().item().type_is::<i32>());
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Object(ObjectInfo),
    Enum(EnumInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Shared(SharedInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to the specific type information, if the kind matches.
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_object: Object => ObjectInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_shared: Shared => SharedInfo);

    /// Returns the underlying [`Type`] metadata.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Object(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Shared(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    /// Returns the [`ReflectKind`] of this info.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Object(_) => ReflectKind::Object,
            Self::Enum(_) => ReflectKind::Enum,
            Self::List(_) => ReflectKind::List,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Shared(_) => ReflectKind::Shared,
        }
    }

    /// Returns the generic parameters. Scalars have none.
    pub fn generics(&self) -> &Generics {
        static EMPTY: Generics = Generics::EMPTY;
        match self {
            Self::Scalar(_) => &EMPTY,
            Self::Object(info) => info.generics(),
            Self::Enum(info) => info.generics(),
            Self::List(info) => info.generics(),
            Self::Set(info) => info.generics(),
            Self::Map(info) => info.generics(),
            Self::Optional(info) => info.generics(),
            Self::Shared(info) => info.generics(),
        }
    }
}
