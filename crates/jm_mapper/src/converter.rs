//! The converter contract and the engine state a converter can ask for.
//!
//! A [`Converter`] turns one reflected value into a JSON value and back.
//! Everything beyond the value and its [`PropertyMeta`] is opt-in: the
//! converter lists the [`Capabilities`] it needs, and the
//! [`Negotiator`](crate::Negotiator) fills the matching slots of the
//! [`ConvertContext`] before each call.

use alloc::boxed::Box;
use core::fmt;

use bitflags::bitflags;
use jm_reflect::Reflect;
use jm_reflect::descriptor::TypeDescriptor;
use jm_reflect::info::TypeInfo;
use serde_json::Value;

use crate::error::MapError;
use crate::meta::{ConverterParams, EnumMembers, PropertyMeta};
use crate::registry::Resolved;

// -----------------------------------------------------------------------------
// Capabilities

bitflags! {
    /// Optional engine state a [`Converter`] receives through its [`ConvertContext`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The enum member list of the property, or of the declared enum.
        const ENUM_MEMBERS = 1 << 0;
        /// The [`TypeDescriptor`] of the declared type.
        const TYPE_INFO = 1 << 1;
        /// The pre-existing destination map, when deserializing into a mutable object.
        const MAP_INSTANCE = 1 << 2;
        /// The pre-existing destination list or set, when deserializing into a mutable object.
        const ITERABLE_INSTANCE = 1 << 3;
        /// The engine's resolve and apply callbacks, see [`CompositeHost`].
        const COMPOSITE = 1 << 4;
        /// The engine's nested object callbacks, see [`RecursiveHost`].
        const RECURSIVE = 1 << 5;
    }
}

// -----------------------------------------------------------------------------
// Decoded

/// The outcome of [`Converter::from_json`].
pub enum Decoded {
    /// A new value of the declared type.
    Value(Box<dyn Reflect>),
    /// The injected destination was refilled; there is nothing to assign.
    InPlace,
    /// The JSON value maps to no value; the property keeps its default.
    Absent,
}

impl Decoded {
    /// Returns the decoded value, if there is one.
    #[inline]
    pub fn into_value(self) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Value(value) => Some(value),
            Self::InPlace | Self::Absent => None,
        }
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::InPlace => f.write_str("InPlace"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

// -----------------------------------------------------------------------------
// Converter

/// A bidirectional strategy between a reflected value and its JSON form.
///
/// A converter owns nothing it converts. The same instance serves every
/// property it is resolved for, so per-call state lives in the
/// [`ConvertContext`].
///
/// # Examples
///
/// ```
/// use jm_reflect::Reflect;
/// use jm_mapper::{ConvertContext, Converter, Decoded, JsonMapper, MapError};
/// use serde_json::Value;
///
/// struct Shout;
///
/// impl Converter for Shout {
///     fn name(&self) -> &'static str {
///         "shout"
///     }
///
///     fn to_json(&self, value: &dyn Reflect, _: &ConvertContext<'_>) -> Result<Value, MapError> {
///         let text = value.downcast_ref::<String>().ok_or_else(|| MapError::mismatch("String", "other"))?;
///         Ok(Value::String(text.to_uppercase()))
///     }
///
///     fn from_json(&self, json: &Value, _: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
///         let text = json.as_str().ok_or_else(|| MapError::unexpected_json("a string", json))?;
///         Ok(Decoded::Value(Box::new(text.to_lowercase())))
///     }
/// }
///
/// let mapper = JsonMapper::new();
/// mapper.register_converter::<String>(Shout);
/// assert_eq!(mapper.serialize(&String::from("hey")).unwrap(), "\"HEY\"");
/// ```
pub trait Converter: Send + Sync + 'static {
    /// A short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The engine state this converter needs.
    #[inline]
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Encodes `value`.
    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError>;

    /// Decodes `json` into a value of the declared type.
    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError>;
}

// -----------------------------------------------------------------------------
// Hosts

/// Engine callbacks for converters that convert nested values, such as
/// container elements, with the same rules as top-level properties.
pub trait CompositeHost {
    /// Resolves the converter for a value of type `ty` described by `meta`.
    fn resolve(&self, meta: &PropertyMeta, ty: &'static TypeDescriptor) -> Resolved;

    /// Applies a resolved converter in the serialize direction.
    fn apply_to_json(&self, resolved: &Resolved, value: &dyn Reflect) -> Result<Value, MapError>;

    /// Applies a resolved converter in the deserialize direction.
    fn apply_from_json(
        &self,
        resolved: &Resolved,
        json: &Value,
        destination: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, MapError>;
}

/// Engine callbacks for converters that hand user objects back to the walker.
pub trait RecursiveHost {
    /// Serializes the properties of a reflected object.
    fn serialize_object(&self, value: &dyn Reflect) -> Result<Value, MapError>;

    /// Builds an object of type `info` from a JSON object.
    fn deserialize_object(&self, json: &Value, info: &'static TypeInfo) -> Result<Decoded, MapError>;
}

// -----------------------------------------------------------------------------
// ConvertContext

/// Per-call state of a converter invocation.
///
/// Assembled by the [`Negotiator`](crate::Negotiator); a slot is filled only
/// when the converter declares the matching [`Capabilities`] flag.
pub struct ConvertContext<'a> {
    pub(crate) converter: &'static str,
    pub(crate) meta: &'a PropertyMeta,
    pub(crate) descriptor: Option<&'static TypeDescriptor>,
    pub(crate) enum_members: Option<EnumMembers>,
    pub(crate) destination: Option<&'a mut dyn Reflect>,
    pub(crate) composite: Option<&'a dyn CompositeHost>,
    pub(crate) recursive: Option<&'a dyn RecursiveHost>,
}

impl<'a> ConvertContext<'a> {
    #[inline]
    fn missing(&self, capability: Capabilities) -> MapError {
        MapError::MissingCapability {
            converter: self.converter,
            capability,
        }
    }

    /// The metadata of the converted property.
    #[inline]
    pub fn meta(&self) -> &'a PropertyMeta {
        self.meta
    }

    /// The converter parameters of the property.
    #[inline]
    pub fn params(&self) -> &'a ConverterParams {
        self.meta.params()
    }

    /// The declared type, requires [`Capabilities::TYPE_INFO`].
    pub fn descriptor(&self) -> Result<&'static TypeDescriptor, MapError> {
        self.descriptor
            .ok_or_else(|| self.missing(Capabilities::TYPE_INFO))
    }

    /// The enum members, requires [`Capabilities::ENUM_MEMBERS`].
    pub fn enum_members(&self) -> Result<EnumMembers, MapError> {
        self.enum_members
            .ok_or_else(|| self.missing(Capabilities::ENUM_MEMBERS))
    }

    /// Takes the pre-existing destination container, if one was injected.
    ///
    /// Requires [`Capabilities::MAP_INSTANCE`] or [`Capabilities::ITERABLE_INSTANCE`];
    /// without them this is always `None`.
    #[inline]
    pub fn take_destination(&mut self) -> Option<&'a mut dyn Reflect> {
        self.destination.take()
    }

    /// The composite callbacks, requires [`Capabilities::COMPOSITE`].
    pub fn composite(&self) -> Result<&'a dyn CompositeHost, MapError> {
        self.composite
            .ok_or_else(|| self.missing(Capabilities::COMPOSITE))
    }

    /// The nested object callbacks, requires [`Capabilities::RECURSIVE`].
    pub fn recursive(&self) -> Result<&'a dyn RecursiveHost, MapError> {
        self.recursive
            .ok_or_else(|| self.missing(Capabilities::RECURSIVE))
    }

    /// Creates a conversion failure attributed to this converter.
    #[inline]
    pub fn failure(&self, message: impl fmt::Display) -> MapError {
        MapError::conversion(self.converter, message)
    }
}
