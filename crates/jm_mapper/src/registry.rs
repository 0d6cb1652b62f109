use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use jm_reflect::descriptor::TypeDescriptor;
use jm_reflect::info::{ReflectKind, Typed};
use jm_utils::TypeIdMap;

use crate::converter::{Capabilities, Converter};
use crate::converters;
use crate::meta::PropertyMeta;

// -----------------------------------------------------------------------------
// ResolvedBy

/// Which resolution step picked a converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedBy {
    /// The converter set on the property.
    Explicit,
    /// The default enum converter.
    EnumDefault,
    /// A converter registered for the exact type.
    Registered,
    /// A built-in converter for the type.
    BuiltIn,
    /// The default map or iterable converter.
    ContainerDefault,
    /// Nothing matched; the value passes through or is expanded as an object.
    PassThrough,
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Explicit => "explicit",
            Self::EnumDefault => "enum default",
            Self::Registered => "registered",
            Self::BuiltIn => "built-in",
            Self::ContainerDefault => "container default",
            Self::PassThrough => "pass-through",
        };
        f.pad(text)
    }
}

// -----------------------------------------------------------------------------
// Resolved

/// A converter selected for one call site, with the metadata and type it
/// was selected for.
#[derive(Clone)]
pub struct Resolved {
    converter: Arc<dyn Converter>,
    by: ResolvedBy,
    meta: PropertyMeta,
    descriptor: &'static TypeDescriptor,
}

impl Resolved {
    #[inline]
    pub fn converter(&self) -> &dyn Converter {
        &*self.converter
    }

    #[inline]
    pub fn resolved_by(&self) -> ResolvedBy {
        self.by
    }

    #[inline]
    pub fn meta(&self) -> &PropertyMeta {
        &self.meta
    }

    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("converter", &self.converter.name())
            .field("by", &self.by)
            .field("type", &self.descriptor.path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConverterRegistry

/// Converters registered by exact type.
///
/// Cloning is cheap and yields a snapshot: a later [`register`](Self::register)
/// on one copy leaves the others untouched.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: Arc<TypeIdMap<Arc<dyn Converter>>>,
}

impl ConverterRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `converter` for `T`, replacing any earlier one.
    #[inline]
    pub fn register<T: Typed>(&mut self, converter: impl Converter) {
        self.register_arc(TypeId::of::<T>(), Arc::new(converter));
    }

    /// Registers a shared converter for the type `type_id`.
    pub fn register_arc(&mut self, type_id: TypeId, converter: Arc<dyn Converter>) {
        log::debug!("register converter `{}` for {type_id:?}", converter.name());
        Arc::make_mut(&mut self.converters).insert(type_id, converter);
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<dyn Converter>> {
        self.converters.get(&type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.converters.contains(&type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Selects the converter for a value of type `descriptor` described by `meta`.
    pub fn resolve(&self, meta: &PropertyMeta, descriptor: &'static TypeDescriptor) -> Resolved {
        let (converter, by) = self.select(meta, descriptor);
        log::trace!(
            "`{}` of `{}` resolved to `{}` ({by})",
            meta.declared_name(),
            descriptor.path(),
            converter.name(),
        );
        Resolved {
            converter,
            by,
            meta: meta.clone(),
            descriptor,
        }
    }

    fn select(
        &self,
        meta: &PropertyMeta,
        descriptor: &'static TypeDescriptor,
    ) -> (Arc<dyn Converter>, ResolvedBy) {
        if let Some(explicit) = meta.converter() {
            // A leaf converter on a container applies to its elements.
            let handed_down = has_elements(descriptor)
                && !explicit.capabilities().contains(Capabilities::COMPOSITE);
            if !handed_down {
                return (explicit.clone(), ResolvedBy::Explicit);
            }
        }
        if descriptor.kind() == ReflectKind::Enum {
            return (converters::enum_default(), ResolvedBy::EnumDefault);
        }
        if let Some(registered) = self.get(descriptor.id()) {
            return (registered.clone(), ResolvedBy::Registered);
        }
        if let Some(builtin) = converters::builtin(descriptor) {
            return (builtin, ResolvedBy::BuiltIn);
        }
        if let Some(container) = converters::container_default(descriptor) {
            return (container, ResolvedBy::ContainerDefault);
        }
        (converters::pass_through(), ResolvedBy::PassThrough)
    }
}

fn has_elements(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_container() || descriptor.kind() == ReflectKind::Optional
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jm_reflect::derive::Reflect;
    use jm_reflect::descriptor::TypeDescriptor;

    use super::{ConverterRegistry, ResolvedBy};
    use crate::converters::{EnumConverter, MapConverter, NumberConverter};
    use crate::meta::{JsonProperty, PropertyMeta};

    #[derive(Reflect)]
    enum Suit {
        Hearts,
        Spades,
    }

    #[derive(Reflect)]
    struct Hand {
        #[reflect(@JsonProperty::new().converter(EnumConverter::short_name()))]
        first: Suit,
        #[reflect(@JsonProperty::new().converter(EnumConverter::short_name()))]
        rest: Vec<Suit>,
        #[reflect(@JsonProperty::new().converter(MapConverter))]
        counts: BTreeMap<String, u8>,
    }

    fn field_meta(name: &str) -> (PropertyMeta, &'static TypeDescriptor) {
        use jm_reflect::info::Typed;
        let field = Hand::type_info().as_object().unwrap().field(name).unwrap();
        (
            PropertyMeta::from_field(field).unwrap(),
            TypeDescriptor::resolve(field.type_info()),
        )
    }

    #[test]
    fn resolution_order() {
        let registry = ConverterRegistry::new();
        let root = PropertyMeta::root();

        let cases = [
            (TypeDescriptor::of::<Suit>(), ResolvedBy::EnumDefault, "enum-full-name"),
            (TypeDescriptor::of::<i32>(), ResolvedBy::BuiltIn, "number"),
            (TypeDescriptor::of::<Vec<i32>>(), ResolvedBy::ContainerDefault, "iterable"),
            (TypeDescriptor::of::<BTreeMap<u8, u8>>(), ResolvedBy::ContainerDefault, "map"),
            (TypeDescriptor::of::<Option<u8>>(), ResolvedBy::BuiltIn, "optional"),
            (TypeDescriptor::of::<String>(), ResolvedBy::PassThrough, "pass-through"),
            (TypeDescriptor::of::<Hand>(), ResolvedBy::PassThrough, "pass-through"),
        ];
        for (descriptor, by, name) in cases {
            let resolved = registry.resolve(&root, descriptor);
            assert_eq!(resolved.resolved_by(), by, "{}", descriptor.path());
            assert_eq!(resolved.converter().name(), name);
        }
    }

    #[test]
    fn registration_overrides_builtin() {
        let mut registry = ConverterRegistry::new();
        let snapshot = registry.clone();
        registry.register::<i32>(EnumConverter::index());

        let resolved = registry.resolve(&PropertyMeta::root(), TypeDescriptor::of::<i32>());
        assert_eq!(resolved.resolved_by(), ResolvedBy::Registered);
        assert_eq!(resolved.converter().name(), "enum-index");

        // Earlier snapshots keep their converters.
        let resolved = snapshot.resolve(&PropertyMeta::root(), TypeDescriptor::of::<i32>());
        assert_eq!(resolved.resolved_by(), ResolvedBy::BuiltIn);

        // Registration never beats the enum default.
        registry.register::<Suit>(NumberConverter);
        let resolved = registry.resolve(&PropertyMeta::root(), TypeDescriptor::of::<Suit>());
        assert_eq!(resolved.resolved_by(), ResolvedBy::EnumDefault);
    }

    #[test]
    fn explicit_leaf_converter_is_handed_to_elements() {
        let registry = ConverterRegistry::new();

        let (meta, descriptor) = field_meta("first");
        let resolved = registry.resolve(&meta, descriptor);
        assert_eq!(resolved.resolved_by(), ResolvedBy::Explicit);

        let (meta, descriptor) = field_meta("rest");
        let container = registry.resolve(&meta, descriptor);
        assert_eq!(container.resolved_by(), ResolvedBy::ContainerDefault);
        let element = registry.resolve(&meta.element(), descriptor.params()[0]);
        assert_eq!(element.resolved_by(), ResolvedBy::Explicit);
        assert_eq!(element.converter().name(), "enum-short-name");

        let (meta, descriptor) = field_meta("counts");
        let resolved = registry.resolve(&meta, descriptor);
        assert_eq!(resolved.resolved_by(), ResolvedBy::Explicit);
        assert_eq!(resolved.converter().name(), "map");
    }
}
