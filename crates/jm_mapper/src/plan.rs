use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use jm_reflect::Reflect;
use jm_reflect::descriptor::TypeDescriptor;
use jm_reflect::info::{Constructor, TypeInfo};
use jm_utils::TypeIdMap;
use jm_utils::hash::HashMap;

use crate::error::MapError;
use crate::meta::PropertyMeta;

// -----------------------------------------------------------------------------
// Strategy

/// How instances of an object type are built during deserialization.
#[derive(Clone, Copy)]
pub enum Strategy {
    /// Default-construct, then assign fields.
    Mutable(fn() -> Box<dyn Reflect>),
    /// Collect every value, then call the named-argument constructor once.
    Immutable(&'static Constructor),
    /// Neither constructor is available.
    Unsupported,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutable(_) => f.write_str("Mutable"),
            Self::Immutable(constructor) => f.debug_tuple("Immutable").field(&constructor.params()).finish(),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectPlan

/// One declared property of an [`ObjectPlan`].
#[derive(Debug)]
pub struct PlanProperty {
    index: usize,
    meta: PropertyMeta,
    descriptor: &'static TypeDescriptor,
}

impl PlanProperty {
    /// The field index in the object.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn meta(&self) -> &PropertyMeta {
        &self.meta
    }

    /// The declared type of the field.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }
}

/// Everything the walker needs to map one object type, built once per type.
pub struct ObjectPlan {
    type_path: &'static str,
    properties: Vec<PlanProperty>,
    by_wire_name: HashMap<&'static str, usize>,
    strategy: Strategy,
}

static PLANS: RwLock<TypeIdMap<&'static ObjectPlan>> = RwLock::new(TypeIdMap::new());

impl ObjectPlan {
    /// Returns the cached plan of the object type `info`.
    pub fn of(info: &'static TypeInfo) -> Result<&'static Self, MapError> {
        let id = info.type_id();
        if let Some(plan) = PLANS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
        {
            return Ok(plan);
        }

        let plan = Self::build(info)?;
        log::debug!(
            "built mapping plan of `{}`: {} properties, {:?}",
            plan.type_path,
            plan.properties.len(),
            plan.strategy,
        );

        Ok(*PLANS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(id, || &*Box::leak(Box::new(plan))))
    }

    fn build(info: &'static TypeInfo) -> Result<Self, MapError> {
        let object = info
            .as_object()
            .ok_or_else(|| MapError::unsupported(info.type_path(), "not an object type"))?;

        let mut properties = Vec::with_capacity(object.field_len());
        let mut by_wire_name = HashMap::default();
        for (index, field) in object.fields().iter().enumerate() {
            let meta = PropertyMeta::from_field(field)?;
            if !meta.is_ignored() {
                by_wire_name.insert(meta.wire_name(), index);
            }
            properties.push(PlanProperty {
                index,
                meta,
                descriptor: TypeDescriptor::resolve(field.type_info()),
            });
        }

        let strategy = match (object.default_fn(), object.constructor()) {
            (Some(default), _) => Strategy::Mutable(default),
            (None, Some(constructor)) => Strategy::Immutable(constructor),
            (None, None) => Strategy::Unsupported,
        };

        Ok(Self {
            type_path: info.type_path(),
            properties,
            by_wire_name,
            strategy,
        })
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// All declared properties, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PlanProperty] {
        &self.properties
    }

    /// The properties that are mapped, in declaration order.
    #[inline]
    pub fn mapped(&self) -> impl Iterator<Item = &PlanProperty> {
        self.properties.iter().filter(|p| !p.meta.is_ignored())
    }

    /// Looks a mapped property up by its wire name.
    #[inline]
    pub fn by_wire_name(&self, name: &str) -> Option<&PlanProperty> {
        self.by_wire_name
            .get(name)
            .and_then(|&index| self.properties.get(index))
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl fmt::Debug for ObjectPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPlan")
            .field("type_path", &self.type_path)
            .field("properties", &self.properties)
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use jm_reflect::info::Typed;

    use super::{ObjectPlan, Strategy};
    use crate::meta::JsonProperty;

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Draft {
        #[reflect(@JsonProperty::new().name("t"))]
        title: String,
        #[reflect(@JsonProperty::new().ignore())]
        dirty: bool,
        words: u32,
    }

    #[derive(Reflect, Default)]
    #[reflect(constructor)]
    struct Frozen {
        id: u64,
    }

    #[derive(Reflect)]
    struct Opaque {
        id: u64,
    }

    #[test]
    fn plan_lookup_and_strategy() {
        let plan = ObjectPlan::of(Draft::type_info()).unwrap();
        assert!(core::ptr::eq(plan, ObjectPlan::of(Draft::type_info()).unwrap()));
        assert!(matches!(plan.strategy(), Strategy::Mutable(_)));

        assert_eq!(plan.properties().len(), 3);
        let mapped: Vec<_> = plan.mapped().map(|p| p.meta().wire_name()).collect();
        assert_eq!(mapped, ["t", "words"]);

        assert_eq!(plan.by_wire_name("t").map(|p| p.index()), Some(0));
        assert!(plan.by_wire_name("title").is_none());
        assert!(plan.by_wire_name("dirty").is_none());
        assert_eq!(plan.by_wire_name("words").unwrap().descriptor().bare(), "u32");
    }

    #[test]
    fn strategy_follows_constructors() {
        let frozen = ObjectPlan::of(Frozen::type_info()).unwrap();
        assert!(matches!(frozen.strategy(), Strategy::Immutable(c) if c.params() == ["id"]));

        let opaque = ObjectPlan::of(Opaque::type_info()).unwrap();
        assert!(matches!(opaque.strategy(), Strategy::Unsupported));

        assert!(ObjectPlan::of(u8::type_info()).is_err());
    }
}
