//! Annotation-driven mapping between object graphs and JSON.
//!
//! - [`reflect`]: runtime type information, the `Reflect` derive and
//!   per-type descriptors.
//! - [`mapper`]: the JSON mapping engine, its converter registry and the
//!   built-in converters.
//! - [`utils`]: hash containers keyed by `TypeId`.
//!
//! ```
//! use jm_core::mapper::JsonMapper;
//! use jm_core::reflect::derive::Reflect;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Sensor {
//!     id: u16,
//!     tags: Vec<String>,
//! }
//!
//! let sensor = Sensor { id: 7, tags: vec!["hot".into()] };
//! let text = JsonMapper::new().serialize(&sensor).unwrap();
//! assert_eq!(text, "{\n \"id\": 7,\n \"tags\": [\n  \"hot\"\n ]\n}");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use jm_mapper as mapper;
pub use jm_reflect as reflect;
pub use jm_utils as utils;
