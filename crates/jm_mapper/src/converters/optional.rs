use jm_reflect::Reflect;
use serde_json::Value;

use super::resolve_param;
use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// `Option<T>`: `None` is `null`, `Some` is the converted inner value.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionalConverter;

impl Converter for OptionalConverter {
    fn name(&self) -> &'static str {
        "optional"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::COMPOSITE | Capabilities::TYPE_INFO
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let optional = value.reflect_ref().as_optional().ok_or_else(|| {
            MapError::mismatch("an option", value.reflect_type_info().type_path())
        })?;
        match optional.value() {
            None => Ok(Value::Null),
            Some(inner) => ctx.composite()?.apply_to_json(&resolve_param(ctx, 0)?, inner),
        }
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let descriptor = ctx.descriptor()?;
        let info = descriptor
            .info()
            .as_optional()
            .ok_or_else(|| MapError::unsupported(descriptor.path(), "not an option type"))?;
        if json.is_null() {
            return Ok(Decoded::Value(info.none()));
        }

        let resolved = resolve_param(ctx, 0)?;
        let Some(inner) = ctx.composite()?.apply_from_json(&resolved, json, None)?.into_value() else {
            return Ok(Decoded::Absent);
        };
        info.some(inner).map(Decoded::Value).map_err(|inner| {
            MapError::mismatch(resolved.descriptor().path(), inner.reflect_type_info().type_path())
        })
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::converters::NumberConverter;
    use crate::meta::JsonProperty;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Profile {
        nickname: Option<String>,
        #[reflect(@JsonProperty::new().converter(NumberConverter).param("format", "0.0"))]
        score: Option<f64>,
    }

    #[test]
    fn none_is_null() {
        let mapper = JsonMapper::new();
        let json = mapper.to_value(&Profile::default()).unwrap();
        assert_eq!(json, json!({ "nickname": null, "score": null }));

        let profile = Profile {
            nickname: Some("kit".into()),
            score: Some(9.25),
        };
        let json = mapper.to_value(&profile).unwrap();
        assert_eq!(json, json!({ "nickname": "kit", "score": "9.2" }));

        let back: Profile = mapper.from_value(&json!({ "nickname": null, "score": "9.5" })).unwrap();
        assert_eq!(back, Profile { nickname: None, score: Some(9.5) });
    }
}
