use alloc::boxed::Box;

use jm_reflect::Reflect;
use jm_reflect::info::TypeInfo;
use jm_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// The converter of last resort.
///
/// User objects are handed back to the walker, which expands them property
/// by property. Scalars with `serde` hooks (`bool`, `char`, `String`, ...)
/// use their native JSON form unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughConverter;

impl Converter for PassThroughConverter {
    fn name(&self) -> &'static str {
        "pass-through"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TYPE_INFO | Capabilities::RECURSIVE
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        match value.reflect_ref() {
            ReflectRef::Object(_) => ctx.recursive()?.serialize_object(value),
            _ => serde_to_json(value).unwrap_or_else(|| {
                Err(MapError::unsupported(
                    value.reflect_type_info().type_path(),
                    "no converter resolves for this type",
                ))
            }),
        }
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let info = ctx.descriptor()?.info();
        match info {
            TypeInfo::Object(_) => ctx.recursive()?.deserialize_object(json, info),
            _ => match serde_from_json(info, json) {
                Some(decoded) => decoded.map(Decoded::Value),
                None => Err(MapError::unsupported(
                    info.type_path(),
                    "no converter resolves for this type",
                )),
            },
        }
    }
}

/// The native JSON form of a scalar with `serde` hooks.
pub(super) fn serde_to_json(value: &dyn Reflect) -> Option<Result<Value, MapError>> {
    let serializable = value.reflect_type_info().as_scalar()?.serializable(value)?;
    Some(serde_json::to_value(serializable).map_err(MapError::from))
}

/// Decodes a scalar with `serde` hooks from its native JSON form.
pub(super) fn serde_from_json(
    info: &'static TypeInfo,
    json: &Value,
) -> Option<Result<Box<dyn Reflect>, MapError>> {
    let decoded = info.as_scalar()?.deserialize(json)?;
    Some(decoded.map_err(MapError::from))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[test]
    fn native_scalars_pass_through() {
        let mapper = JsonMapper::new();
        assert_eq!(mapper.to_value(&true).unwrap(), json!(true));
        assert_eq!(mapper.to_value(&'x').unwrap(), json!("x"));
        assert_eq!(mapper.to_value(&String::from("hi")).unwrap(), json!("hi"));
        assert_eq!(mapper.from_value::<String>(&json!("hi")).unwrap(), "hi");

        let error = mapper.from_value::<bool>(&json!("yes")).unwrap_err();
        assert!(matches!(error, MapError::Json(_)));
    }

    #[test]
    fn opaque_scalars_are_unsupported() {
        struct Opaque;
        jm_reflect::impl_reflect_scalar!(Opaque);

        let error = JsonMapper::new().to_value(&Opaque).unwrap_err();
        assert!(matches!(error, MapError::UnsupportedType { .. }));
    }
}
