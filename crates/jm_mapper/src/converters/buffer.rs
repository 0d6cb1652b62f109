use alloc::boxed::Box;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use jm_reflect::Reflect;
use serde_json::Value;

use crate::converter::{ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// Binary buffers as standard, padded base64 text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Converter;

impl Converter for Base64Converter {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let bytes = value.downcast_ref::<Bytes>().ok_or_else(|| {
            MapError::mismatch("bytes::Bytes", value.reflect_type_info().type_path())
        })?;
        Ok(Value::String(STANDARD.encode(bytes)))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let text = match json {
            Value::String(text) => text,
            Value::Null => return Ok(Decoded::Absent),
            other => return Err(MapError::unexpected_json("a base64 string", other)),
        };
        let decoded = STANDARD
            .decode(text)
            .map_err(|error| ctx.failure(alloc::format!("invalid base64: {error}")))?;
        Ok(Decoded::Value(Box::new(Bytes::from(decoded))))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[test]
    fn bytes_as_base64() {
        let mapper = JsonMapper::new();
        let payload = Bytes::from_static(b"hello\x00world");
        let json = mapper.to_value(&payload).unwrap();
        assert_eq!(json, json!("aGVsbG8Ad29ybGQ="));
        assert_eq!(mapper.from_value::<Bytes>(&json).unwrap(), payload);

        let error = mapper.from_value::<Bytes>(&json!("not base64!")).unwrap_err();
        assert!(matches!(error, MapError::ConversionFailure { converter: "base64", .. }));
    }
}
