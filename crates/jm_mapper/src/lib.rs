//! Annotation-driven mapping between reflected object graphs and JSON.
//!
//! A [`JsonMapper`] walks a value through its reflection data, resolves a
//! [`Converter`] for every property and assembles an ordered JSON document.
//! The reverse direction builds the target type through its default or
//! named-argument constructor.
//!
//! Properties are configured with a [`JsonProperty`] custom attribute:
//!
//! ```
//! use jm_reflect::derive::Reflect;
//! use jm_mapper::{JsonMapper, JsonProperty};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct User {
//!     #[reflect(@JsonProperty::new().name("user_name"))]
//!     name: String,
//!     #[reflect(@JsonProperty::new().ignore())]
//!     password: String,
//!     age: u32,
//! }
//!
//! let mapper = JsonMapper::new();
//! let user = User { name: "ann".into(), password: "secret".into(), age: 31 };
//!
//! let text = mapper.serialize(&user).unwrap();
//! assert_eq!(text, "{\n \"user_name\": \"ann\",\n \"age\": 31\n}");
//!
//! let back: User = mapper.deserialize(&text).unwrap();
//! assert_eq!(back, User { password: String::new(), ..user });
//! ```
//!
//! ## Converter resolution
//!
//! For every property, the first match wins:
//!
//! 1. the converter set on the property (handed down to the elements of a
//!    container when the converter is not composite);
//! 2. the full-name enum converter, for enums;
//! 3. a converter registered with [`register_converter`];
//! 4. a built-in converter for the type;
//! 5. the map or iterable converter, for containers;
//! 6. the pass-through converter, which expands nested objects.

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod error;
mod mapper;
mod meta;
mod negotiator;
mod plan;
mod registry;
mod walker;
mod writer;

pub mod converter;
pub mod converters;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-level exports

pub use converter::{Capabilities, CompositeHost, ConvertContext, Converter, Decoded, RecursiveHost};
pub use converters::Symbol;
pub use error::MapError;
pub use mapper::{
    JsonMapper, MapperOptions, deserialize, deserialize_dyn, from_value, global, register_converter,
    serialize, to_value,
};
pub use meta::{ConverterParams, EnumMembers, JsonProperty, PropertyMeta};
pub use negotiator::Negotiator;
pub use plan::{ObjectPlan, PlanProperty, Strategy};
pub use registry::{ConverterRegistry, Resolved, ResolvedBy};
