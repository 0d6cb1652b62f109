use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{LazyLock, PoisonError, RwLock};

use jm_reflect::Reflect;
use jm_reflect::info::{TypeInfo, Typed};
use serde_json::Value;

use crate::converter::Converter;
use crate::error::MapError;
use crate::registry::ConverterRegistry;
use crate::walker::Walker;
use crate::writer;

// -----------------------------------------------------------------------------
// MapperOptions

/// Output options of a [`JsonMapper`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapperOptions {
    /// Spaces added per nesting level of pretty output.
    pub indent: usize,
    /// Pretty output; compact when `false`.
    pub pretty: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            indent: 1,
            pretty: true,
        }
    }
}

// -----------------------------------------------------------------------------
// JsonMapper

/// The entry point: serialize, deserialize and converter registration.
///
/// Every call walks with a fresh visited set and a snapshot of the
/// registry taken when the call starts, so concurrent calls never share
/// cycle-detection state and a registration only affects later calls.
pub struct JsonMapper {
    registry: RwLock<ConverterRegistry>,
    options: MapperOptions,
}

impl Default for JsonMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonMapper {
    /// Creates a mapper with an empty registry and default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(MapperOptions::default())
    }

    #[inline]
    pub fn with_options(options: MapperOptions) -> Self {
        Self {
            registry: RwLock::new(ConverterRegistry::new()),
            options,
        }
    }

    #[inline]
    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Registers `converter` for every later value of type `T`.
    pub fn register_converter<T: Typed>(&self, converter: impl Converter) {
        self.register_arc(TypeId::of::<T>(), Arc::new(converter));
    }

    /// Registers a shared converter for the type `type_id`.
    pub fn register_arc(&self, type_id: TypeId, converter: Arc<dyn Converter>) {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register_arc(type_id, converter);
    }

    /// A snapshot of the current registry.
    pub fn registry(&self) -> ConverterRegistry {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Converts `value` into a JSON document.
    pub fn to_value(&self, value: &dyn Reflect) -> Result<Value, MapError> {
        let registry = self.registry();
        Walker::new(&registry).serialize(value)
    }

    /// Converts `value` into JSON text.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<String, MapError> {
        writer::write(&self.to_value(value)?, &self.options)
    }

    /// Builds a value of the type described by `info` from a JSON document.
    pub fn from_value_dyn(
        &self,
        json: &Value,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, MapError> {
        let registry = self.registry();
        Walker::new(&registry).deserialize(json, info)
    }

    /// Builds a `T` from a JSON document.
    pub fn from_value<T: Reflect + Typed>(&self, json: &Value) -> Result<T, MapError> {
        self.from_value_dyn(json, T::type_info())?
            .take::<T>()
            .map_err(|value| MapError::mismatch(T::type_path(), value.reflect_type_info().type_path()))
    }

    /// Builds a value of the type described by `info` from JSON text.
    pub fn deserialize_dyn(
        &self,
        text: &str,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, MapError> {
        let json: Value = serde_json::from_str(text)?;
        self.from_value_dyn(&json, info)
    }

    /// Builds a `T` from JSON text.
    pub fn deserialize<T: Reflect + Typed>(&self, text: &str) -> Result<T, MapError> {
        let json: Value = serde_json::from_str(text)?;
        self.from_value(&json)
    }
}

// -----------------------------------------------------------------------------
// Global mapper

static GLOBAL: LazyLock<JsonMapper> = LazyLock::new(JsonMapper::new);

/// The process-wide mapper behind the free functions of this crate.
#[inline]
pub fn global() -> &'static JsonMapper {
    &GLOBAL
}

/// Serializes `value` with the global mapper.
#[inline]
pub fn serialize(value: &dyn Reflect) -> Result<String, MapError> {
    GLOBAL.serialize(value)
}

/// Deserializes a `T` with the global mapper.
#[inline]
pub fn deserialize<T: Reflect + Typed>(text: &str) -> Result<T, MapError> {
    GLOBAL.deserialize(text)
}

/// Deserializes a value of type `info` with the global mapper.
#[inline]
pub fn deserialize_dyn(text: &str, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, MapError> {
    GLOBAL.deserialize_dyn(text, info)
}

/// Converts `value` into a document with the global mapper.
#[inline]
pub fn to_value(value: &dyn Reflect) -> Result<Value, MapError> {
    GLOBAL.to_value(value)
}

/// Builds a `T` from a document with the global mapper.
#[inline]
pub fn from_value<T: Reflect + Typed>(json: &Value) -> Result<T, MapError> {
    GLOBAL.from_value(json)
}

/// Registers `converter` for `T` on the global mapper.
///
/// The last registration for a type wins, for every later call in the process.
#[inline]
pub fn register_converter<T: Typed>(converter: impl Converter) {
    GLOBAL.register_converter::<T>(converter);
}
