use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::Display;

use jm_reflect::ops::ConstructError;
use serde_json::Value;
use thiserror::Error;

use crate::converter::Capabilities;

// -----------------------------------------------------------------------------
// MapError

/// Failure of a serialize or deserialize call.
///
/// None of these are recovered from inside the engine; the enclosing
/// top-level call aborts with the first one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// A serialize call reached a value that is already being serialized.
    #[error("circular reference to `{type_path}`")]
    CircularReference { type_path: &'static str },
    /// The type cannot be built or has no usable JSON form.
    #[error("unsupported type `{type_path}`: {reason}")]
    UnsupportedType {
        type_path: &'static str,
        reason: Cow<'static, str>,
    },
    /// A converter could not parse or format a value.
    #[error("converter `{converter}` failed: {message}")]
    ConversionFailure {
        converter: &'static str,
        message: String,
    },
    /// A value or document has another shape than the declared type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
    /// A converter used engine state it did not declare a capability for.
    #[error("converter `{converter}` requires the {capability:?} capability")]
    MissingCapability {
        converter: &'static str,
        capability: Capabilities,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Construct(#[from] ConstructError),
    /// Another error, with the property path where it happened.
    #[error("at {path}: {source}")]
    At {
        path: String,
        #[source]
        source: Box<MapError>,
    },
}

impl MapError {
    /// Creates a [`MapError::ConversionFailure`].
    #[inline]
    pub fn conversion(converter: &'static str, message: impl Display) -> Self {
        Self::ConversionFailure {
            converter,
            message: message.to_string(),
        }
    }

    /// Creates a [`MapError::TypeMismatch`].
    #[inline]
    pub fn mismatch(
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a [`MapError::TypeMismatch`] for a JSON value of the wrong shape.
    #[inline]
    pub fn unexpected_json(expected: &'static str, found: &Value) -> Self {
        Self::mismatch(expected, json_kind(found))
    }

    /// Creates a [`MapError::UnsupportedType`].
    #[inline]
    pub fn unsupported(type_path: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedType {
            type_path,
            reason: reason.into(),
        }
    }

    /// Returns the error without its location.
    pub fn root(&self) -> &MapError {
        match self {
            Self::At { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the property path of the error, if it was recorded.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::At { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// A short name of the JSON value kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::MapError;

    #[test]
    fn root_unwraps_location() {
        let error = MapError::At {
            path: "$.a.b".into(),
            source: Box::new(MapError::CircularReference { type_path: "x::Node" }),
        };
        assert_eq!(error.path(), Some("$.a.b"));
        assert!(matches!(error.root(), MapError::CircularReference { .. }));
        assert_eq!(error.to_string(), "at $.a.b: circular reference to `x::Node`");
    }

    #[test]
    fn json_mismatch_names_the_kind() {
        let error = MapError::unexpected_json("an object", &serde_json::json!([1]));
        assert_eq!(error.to_string(), "expected an object, found an array");
    }
}
