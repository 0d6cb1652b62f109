use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Enum, List, Map, Object, Optional, Set, Shared};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable view of a reflected value, split by [kind](ReflectKind).
///
/// Obtained by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Scalar(&'a dyn Reflect),
    Object(&'a dyn Object),
    Enum(&'a dyn Enum),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Shared(&'a dyn Shared),
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable view of a reflected value, split by [kind](ReflectKind).
///
/// Obtained by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Reflect),
    Object(&'a mut dyn Object),
    Enum(&'a mut dyn Enum),
    List(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Shared(&'a mut dyn Shared),
}

macro_rules! impl_kind_fn {
    () => {
        /// Returns the [`ReflectKind`] of this view.
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
    };
}

macro_rules! impl_cast_fn {
    ($name:ident : $kind:ident) => {
        /// Returns the inner view if the kind matches.
        #[inline]
        pub fn $name(self) -> Option<&'a dyn $kind> {
            match self {
                Self::$kind(value) => Some(value),
                _ => None,
            }
        }
    };
    (mut $name:ident : $kind:ident) => {
        /// Returns the inner view if the kind matches.
        #[inline]
        pub fn $name(self) -> Option<&'a mut dyn $kind> {
            match self {
                Self::$kind(value) => Some(value),
                _ => None,
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_kind_fn!();

    impl_cast_fn!(as_object: Object);
    impl_cast_fn!(as_enum: Enum);
    impl_cast_fn!(as_list: List);
    impl_cast_fn!(as_set: Set);
    impl_cast_fn!(as_map: Map);
    impl_cast_fn!(as_optional: Optional);
    impl_cast_fn!(as_shared: Shared);
}

impl<'a> ReflectMut<'a> {
    impl_kind_fn!();

    impl_cast_fn!(mut as_object: Object);
    impl_cast_fn!(mut as_enum: Enum);
    impl_cast_fn!(mut as_list: List);
    impl_cast_fn!(mut as_set: Set);
    impl_cast_fn!(mut as_map: Map);
    impl_cast_fn!(mut as_optional: Optional);
    impl_cast_fn!(mut as_shared: Shared);
}
