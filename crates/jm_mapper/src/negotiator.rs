use jm_reflect::Reflect;
use jm_reflect::info::ReflectKind;

use crate::converter::{Capabilities, CompositeHost, ConvertContext, RecursiveHost};
use crate::meta::EnumMembers;
use crate::registry::Resolved;

// -----------------------------------------------------------------------------
// Negotiator

/// Builds the [`ConvertContext`] of one converter call.
///
/// The context depends on the call site, not only on the converter: the
/// same converter instance sees another destination and another declared
/// type at every property, so negotiation runs before each call.
pub struct Negotiator;

impl Negotiator {
    /// Context for a serialize call.
    pub fn for_serialize<'a, H>(resolved: &'a Resolved, host: &'a H) -> ConvertContext<'a>
    where
        H: CompositeHost + RecursiveHost,
    {
        Self::negotiate(resolved, host, None)
    }

    /// Context for a deserialize call, with the pre-existing value of the
    /// property when the enclosing object is built in place.
    pub fn for_deserialize<'a, H>(
        resolved: &'a Resolved,
        host: &'a H,
        destination: Option<&'a mut (dyn Reflect + '_)>,
    ) -> ConvertContext<'a>
    where
        H: CompositeHost + RecursiveHost,
    {
        Self::negotiate(resolved, host, destination)
    }

    fn negotiate<'a, H>(
        resolved: &'a Resolved,
        host: &'a H,
        destination: Option<&'a mut (dyn Reflect + '_)>,
    ) -> ConvertContext<'a>
    where
        H: CompositeHost + RecursiveHost,
    {
        let converter = resolved.converter();
        let caps = converter.capabilities();
        let descriptor = resolved.descriptor();

        let enum_members = if caps.contains(Capabilities::ENUM_MEMBERS) {
            // Without a declared member list the enum's own variants are used.
            resolved
                .meta()
                .enum_members()
                .or_else(|| EnumMembers::of(descriptor.info()))
        } else {
            None
        };

        let accepts_destination = match descriptor.kind() {
            ReflectKind::Map => caps.contains(Capabilities::MAP_INSTANCE),
            ReflectKind::List | ReflectKind::Set => caps.contains(Capabilities::ITERABLE_INSTANCE),
            _ => false,
        };
        let destination = destination
            .filter(|value| accepts_destination && value.ty_id() == descriptor.id())
            .map(|value| value as &'a mut dyn Reflect);

        ConvertContext {
            converter: converter.name(),
            meta: resolved.meta(),
            descriptor: caps.contains(Capabilities::TYPE_INFO).then_some(descriptor),
            enum_members,
            destination,
            composite: caps
                .contains(Capabilities::COMPOSITE)
                .then_some(host as &dyn CompositeHost),
            recursive: caps
                .contains(Capabilities::RECURSIVE)
                .then_some(host as &dyn RecursiveHost),
        }
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::Reflect;
    use jm_reflect::descriptor::TypeDescriptor;
    use jm_reflect::info::TypeInfo;
    use serde_json::Value;

    use super::Negotiator;
    use crate::converter::{CompositeHost, Decoded, RecursiveHost};
    use crate::error::MapError;
    use crate::meta::PropertyMeta;
    use crate::registry::{ConverterRegistry, Resolved};

    struct NoHost;

    impl CompositeHost for NoHost {
        fn resolve(&self, meta: &PropertyMeta, ty: &'static TypeDescriptor) -> Resolved {
            ConverterRegistry::new().resolve(meta, ty)
        }

        fn apply_to_json(&self, _: &Resolved, _: &dyn Reflect) -> Result<Value, MapError> {
            Ok(Value::Null)
        }

        fn apply_from_json(
            &self,
            _: &Resolved,
            _: &Value,
            _: Option<&mut dyn Reflect>,
        ) -> Result<Decoded, MapError> {
            Ok(Decoded::Absent)
        }
    }

    impl RecursiveHost for NoHost {
        fn serialize_object(&self, _: &dyn Reflect) -> Result<Value, MapError> {
            Ok(Value::Null)
        }

        fn deserialize_object(&self, _: &Value, _: &'static TypeInfo) -> Result<Decoded, MapError> {
            Ok(Decoded::Absent)
        }
    }

    fn resolve<T: jm_reflect::info::Typed>() -> Resolved {
        ConverterRegistry::new().resolve(&PropertyMeta::root(), TypeDescriptor::of::<T>())
    }

    #[test]
    fn injects_only_declared_capabilities() {
        // The number converter only reads the declared type.
        let resolved = resolve::<f64>();
        let ctx = Negotiator::for_serialize(&resolved, &NoHost);
        assert!(ctx.descriptor().is_ok());
        assert!(ctx.composite().is_err());
        assert!(ctx.recursive().is_err());
        assert!(matches!(
            ctx.enum_members(),
            Err(MapError::MissingCapability { converter: "number", .. })
        ));
    }

    #[test]
    fn destination_requires_matching_instance_capability() {
        let resolved = resolve::<Vec<u8>>();
        let mut existing = vec![1_u8, 2];
        let mut ctx = Negotiator::for_deserialize(&resolved, &NoHost, Some(&mut existing));
        assert!(ctx.composite().is_ok());
        assert!(ctx.take_destination().is_some());
        assert!(ctx.take_destination().is_none());

        // A destination of another type is dropped.
        let mut other = vec![1_u16];
        let mut ctx = Negotiator::for_deserialize(&resolved, &NoHost, Some(&mut other));
        assert!(ctx.take_destination().is_none());

        // Optional values never receive one.
        let resolved = resolve::<Option<Vec<u8>>>();
        let mut existing = Some(vec![1_u8]);
        let mut ctx = Negotiator::for_deserialize(&resolved, &NoHost, Some(&mut existing));
        assert!(ctx.take_destination().is_none());
    }
}
