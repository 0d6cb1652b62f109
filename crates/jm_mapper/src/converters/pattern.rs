use alloc::boxed::Box;

use jm_reflect::Reflect;
use regex::Regex;
use serde_json::Value;

use crate::converter::{ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// Regular expressions as their source pattern.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexConverter;

impl Converter for RegexConverter {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let regex = value.downcast_ref::<Regex>().ok_or_else(|| {
            MapError::mismatch("regex::Regex", value.reflect_type_info().type_path())
        })?;
        Ok(Value::String(regex.as_str().into()))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        match json {
            Value::String(source) => {
                let regex = Regex::new(source).map_err(|error| ctx.failure(error))?;
                Ok(Decoded::Value(Box::new(regex)))
            }
            Value::Null => Ok(Decoded::Absent),
            other => Err(MapError::unexpected_json("a pattern string", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[test]
    fn pattern_source() {
        let mapper = JsonMapper::new();
        let json = mapper.to_value(&Regex::new(r"^\d{3}-\w+$").unwrap()).unwrap();
        assert_eq!(json, json!(r"^\d{3}-\w+$"));

        let regex = mapper.from_value::<Regex>(&json).unwrap();
        assert!(regex.is_match("123-abc"));

        let error = mapper.from_value::<Regex>(&json!("(")).unwrap_err();
        assert!(matches!(error, MapError::ConversionFailure { converter: "regex", .. }));
    }
}
