//! The resolved shape of a declared type.
//!
//! A [`TypeDescriptor`] answers three questions about a type: what is its
//! bare identity, is it a generic container, and what are its type
//! parameters in declaration order. Converters that handle containers read
//! the parameters to convert elements; the registry reads the identity.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use jm_utils::TypeIdMap;

use crate::info::{ReflectKind, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The generic shape of a type, resolved once and cached per type.
///
/// | type | container | params |
/// |---|---|---|
/// | `i32`, `String`, a derived struct | no | `[]` |
/// | `Vec<T>`, `BTreeSet<T>` | yes | `[T]` |
/// | `BTreeMap<K, V>` | yes | `[K, V]` |
/// | `Option<T>`, `Arc<RwLock<T>>` | no | `[T]` |
/// | a derived `Wrapper<T>` | no | `[T]` |
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use jm_reflect::descriptor::TypeDescriptor;
///
/// let desc = TypeDescriptor::of::<BTreeMap<String, Vec<u8>>>();
///
/// assert!(desc.is_container());
/// assert_eq!(desc.bare(), "BTreeMap");
/// assert_eq!(desc.params()[0].bare(), "String");
/// assert_eq!(desc.params()[1].params()[0].bare(), "u8");
///
/// // Resolution is memoised.
/// assert!(core::ptr::eq(desc, TypeDescriptor::of::<BTreeMap<String, Vec<u8>>>()));
/// ```
pub struct TypeDescriptor {
    id: TypeId,
    bare: &'static str,
    path: &'static str,
    kind: ReflectKind,
    params: Vec<&'static TypeDescriptor>,
    info: &'static TypeInfo,
}

static DESCRIPTORS: RwLock<TypeIdMap<&'static TypeDescriptor>> = RwLock::new(TypeIdMap::new());

impl TypeDescriptor {
    /// Resolves the descriptor of `T`.
    #[inline]
    pub fn of<T: Typed>() -> &'static Self {
        Self::resolve(T::type_info())
    }

    /// Resolves the descriptor of the type described by `info`.
    ///
    /// Repeated calls for the same type return the same descriptor.
    pub fn resolve(info: &'static TypeInfo) -> &'static Self {
        let id = info.type_id();
        if let Some(found) = DESCRIPTORS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
        {
            return found;
        }

        // Parameters resolve without the lock held; they may not be cached yet.
        let params = param_infos(info).into_iter().map(Self::resolve).collect();
        let descriptor = Self {
            id,
            bare: info.type_ident(),
            path: info.type_path(),
            kind: info.kind(),
            params,
            info,
        };

        *DESCRIPTORS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(id, || &*Box::leak(Box::new(descriptor)))
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the bare identifier, without generics (e.g. `Vec`).
    #[inline]
    pub fn bare(&self) -> &'static str {
        self.bare
    }

    /// Returns the full type path, with generics.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the [`ReflectKind`] of the type.
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        self.kind
    }

    /// Returns `true` for lists, sets and maps.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ReflectKind::List | ReflectKind::Set | ReflectKind::Map)
    }

    /// Returns the type parameters in declaration order.
    #[inline]
    pub fn params(&self) -> &[&'static TypeDescriptor] {
        &self.params
    }

    /// Returns the parameter at `index`.
    #[inline]
    pub fn param(&self, index: usize) -> Option<&'static TypeDescriptor> {
        self.params.get(index).copied()
    }

    /// Returns the static type information.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }
}

fn param_infos(info: &TypeInfo) -> Vec<&'static TypeInfo> {
    match info {
        TypeInfo::List(list) => Vec::from([list.item().type_info()]),
        TypeInfo::Set(set) => Vec::from([set.item().type_info()]),
        TypeInfo::Map(map) => Vec::from([map.key().type_info(), map.value().type_info()]),
        TypeInfo::Optional(optional) => Vec::from([optional.some_type().type_info()]),
        TypeInfo::Shared(shared) => Vec::from([shared.inner().type_info()]),
        TypeInfo::Object(_) | TypeInfo::Enum(_) | TypeInfo::Scalar(_) => info
            .generics()
            .iter()
            .map(|param| param.type_info())
            .collect(),
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.params == other.params
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("path", &self.path)
            .field("container", &self.is_container())
            .field("params", &self.params)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::RwLock;

    use super::TypeDescriptor;
    use crate::info::ReflectKind;

    #[test]
    fn scalar_has_no_params() {
        let desc = TypeDescriptor::of::<i32>();
        assert!(!desc.is_container());
        assert!(desc.params().is_empty());
        assert_eq!(desc.kind(), ReflectKind::Scalar);
    }

    #[test]
    fn sequence_has_one_param() {
        let desc = TypeDescriptor::of::<Vec<String>>();
        assert!(desc.is_container());
        assert_eq!(desc.bare(), "Vec");
        assert_eq!(desc.params().len(), 1);
        assert_eq!(desc.param(0).unwrap().path(), "alloc::string::String");

        let set = TypeDescriptor::of::<BTreeSet<u8>>();
        assert_eq!(set.params().len(), 1);
    }

    #[test]
    fn mapping_params_in_declared_order() {
        let desc = TypeDescriptor::of::<BTreeMap<u8, String>>();
        let params: Vec<&str> = desc.params().iter().map(|p| p.bare()).collect();
        assert_eq!(params, ["u8", "String"]);
    }

    #[test]
    fn wrappers_are_not_containers() {
        let optional = TypeDescriptor::of::<Option<Vec<u8>>>();
        assert!(!optional.is_container());
        assert!(optional.param(0).unwrap().is_container());

        let shared = TypeDescriptor::of::<Arc<RwLock<u8>>>();
        assert!(!shared.is_container());
        assert_eq!(shared.param(0).unwrap().bare(), "u8");
    }

    #[test]
    fn resolution_is_stable() {
        let a = TypeDescriptor::of::<BTreeMap<String, Vec<u8>>>();
        let b = TypeDescriptor::of::<BTreeMap<String, Vec<u8>>>();
        assert_eq!(a, b);
        assert!(core::ptr::eq(a, b));
        assert_ne!(a, TypeDescriptor::of::<BTreeMap<String, Vec<i8>>>());
    }
}
