use alloc::boxed::Box;
use alloc::string::ToString;

use http::Uri;
use jm_reflect::Reflect;
use serde_json::Value;

use crate::converter::{ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// URIs as their text.
#[derive(Clone, Copy, Debug, Default)]
pub struct UriConverter;

impl Converter for UriConverter {
    fn name(&self) -> &'static str {
        "uri"
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let uri = value.downcast_ref::<Uri>().ok_or_else(|| {
            MapError::mismatch("http::uri::Uri", value.reflect_type_info().type_path())
        })?;
        Ok(Value::String(uri.to_string()))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        match json {
            Value::String(text) => {
                let uri = text
                    .parse::<Uri>()
                    .map_err(|error| ctx.failure(alloc::format!("`{text}` is not a URI: {error}")))?;
                Ok(Decoded::Value(Box::new(uri)))
            }
            Value::Null => Ok(Decoded::Absent),
            other => Err(MapError::unexpected_json("a URI string", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::Uri;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[test]
    fn uri_text() {
        let mapper = JsonMapper::new();
        let uri: Uri = "https://example.com/a?b=1".parse().unwrap();
        let json = mapper.to_value(&uri).unwrap();
        assert_eq!(json, json!("https://example.com/a?b=1"));
        assert_eq!(mapper.from_value::<Uri>(&json).unwrap(), uri);

        let error = mapper.from_value::<Uri>(&json!("exa mple")).unwrap_err();
        assert!(matches!(error, MapError::ConversionFailure { converter: "uri", .. }));
    }
}
