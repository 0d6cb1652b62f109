use jm_reflect::Reflect;
use serde_json::Value;

use super::resolve_param;
use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// `Arc<RwLock<T>>` as the converted `T`.
///
/// The walker checks a shared value for cycles by its allocation before
/// this converter takes the read lock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SharedConverter;

impl Converter for SharedConverter {
    fn name(&self) -> &'static str {
        "shared"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::COMPOSITE | Capabilities::TYPE_INFO
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let shared = value.reflect_ref().as_shared().ok_or_else(|| {
            MapError::mismatch("a shared value", value.reflect_type_info().type_path())
        })?;
        let resolved = resolve_param(ctx, 0)?;
        let inner = shared.read();
        ctx.composite()?.apply_to_json(&resolved, &**inner)
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let descriptor = ctx.descriptor()?;
        let info = descriptor
            .info()
            .as_shared()
            .ok_or_else(|| MapError::unsupported(descriptor.path(), "not a shared type"))?;

        let resolved = resolve_param(ctx, 0)?;
        let Some(inner) = ctx.composite()?.apply_from_json(&resolved, json, None)?.into_value() else {
            return Ok(Decoded::Absent);
        };
        info.wrap(inner).map(Decoded::Value).map_err(|inner| {
            MapError::mismatch(resolved.descriptor().path(), inner.reflect_type_info().type_path())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use crate::JsonMapper;

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Node {
        label: String,
        child: Option<Arc<RwLock<Node>>>,
    }

    #[test]
    fn shared_values_are_inlined() {
        let mapper = JsonMapper::new();
        let leaf = Arc::new(RwLock::new(Node { label: "leaf".into(), child: None }));
        let root = Node { label: "root".into(), child: Some(leaf) };

        let json = mapper.to_value(&root).unwrap();
        assert_eq!(json, json!({ "label": "root", "child": { "label": "leaf", "child": null } }));

        let back: Node = mapper.from_value(&json).unwrap();
        let child = back.child.unwrap();
        assert_eq!(child.read().unwrap().label, "leaf");
        assert!(child.read().unwrap().child.is_none());
    }
}
