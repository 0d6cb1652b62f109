//! Runtime introspection for the `jm` mapping engine.
//!
//! The engine never touches user types directly; it walks them through the
//! traits in this crate:
//!
//! - [`Reflect`]: type-erased access to a value, split into [kinds](ops::ReflectRef).
//! - [`Typed`](info::Typed): static [`TypeInfo`](info::TypeInfo), built once per type.
//! - [`TypeDescriptor`](descriptor::TypeDescriptor): the resolved generic shape of a type.
//! - [`derive::Reflect`]: the declaration surface, including field attributes.
//!
//! # Example
//!
//! ```
//! use jm_reflect::{Reflect, derive::Reflect, info::Typed};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let info = Point::type_info().as_object().unwrap();
//! assert_eq!(info.field_at(1).unwrap().name(), "y");
//!
//! let point = Point { x: 1, y: 2 };
//! let object = point.reflect_ref().as_object().unwrap();
//! assert_eq!(object.field("y").unwrap().downcast_ref::<i32>(), Some(&2));
//! ```

// Lets the derive output refer to `::jm_reflect` from inside this crate too.
extern crate self as jm_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod descriptor;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use jm_reflect_derive as derive;

/// Items used by macro expansions. Not public API.
#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
    pub use alloc::vec::Vec;
}
