//! Static type information.
//!
//! Every reflected type exposes one [`TypeInfo`] through [`Typed`], built on
//! first access and cached for the rest of the process. The engine reads it
//! to enumerate declared properties, pick a construction strategy and create
//! fresh containers.
//!
//! - [`Type`] / [`TypePath`]: identity and names.
//! - [`Generics`]: ordered type parameters.
//! - [`CustomAttributes`]: values attached to fields by `#[reflect(@expr)]`.
//! - [`ScalarInfo`], [`ObjectInfo`], [`EnumInfo`], [`ListInfo`], [`SetInfo`],
//!   [`MapInfo`], [`OptionalInfo`], [`SharedInfo`]: one per [`ReflectKind`].

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod container_info;
mod enum_info;
mod generics;
mod object_info;
mod scalar_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::CustomAttributes;
pub use container_info::{ElementInfo, ListInfo, MapInfo, OptionalInfo, SetInfo, SharedInfo};
pub use enum_info::EnumInfo;
pub use generics::{Generics, TypeParamInfo};
pub use object_info::{Constructor, FieldInfo, ObjectInfo};
pub use scalar_info::ScalarInfo;
pub use type_info::{ReflectKind, TypeInfo};
pub use type_path::{Type, TypePath};
pub use typed::{DynamicTyped, Typed};

pub(crate) use type_path::impl_type_fn;
