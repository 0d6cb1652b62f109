use alloc::boxed::Box;
use core::any::TypeId;
use core::cell::RefCell;

use jm_reflect::Reflect;
use jm_reflect::descriptor::TypeDescriptor;
use jm_reflect::info::TypeInfo;
use jm_reflect::ops::ReflectRef;
use jm_utils::hash::HashSet;
use serde_json::{Map, Value};

use crate::builder::InstanceBuilder;
use crate::converter::{CompositeHost, Decoded, RecursiveHost};
use crate::error::MapError;
use crate::meta::PropertyMeta;
use crate::negotiator::Negotiator;
use crate::plan::ObjectPlan;
use crate::registry::{ConverterRegistry, Resolved};

// -----------------------------------------------------------------------------
// VisitedSet

/// Identity of a value: its address paired with its type, since a struct
/// and its first field share an address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct Identity {
    addr: usize,
    ty: TypeId,
}

/// Objects on the current serialize path.
#[derive(Default)]
pub(crate) struct VisitedSet {
    entries: HashSet<Identity>,
}

impl VisitedSet {
    #[inline]
    fn insert(&mut self, identity: Identity) -> bool {
        self.entries.insert(identity)
    }

    #[inline]
    fn remove(&mut self, identity: &Identity) {
        self.entries.remove(identity);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Removes its identity from the set on drop, on every exit path.
struct VisitGuard<'w> {
    visited: &'w RefCell<VisitedSet>,
    identity: Identity,
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.visited.borrow_mut().remove(&self.identity);
    }
}

// -----------------------------------------------------------------------------
// PropertyPath

#[cfg(feature = "debug")]
#[derive(Default)]
struct PropertyPath {
    names: alloc::vec::Vec<&'static str>,
}

#[cfg(feature = "debug")]
impl PropertyPath {
    /// Attaches the current path to an error that has none yet.
    fn locate(&self, error: MapError) -> MapError {
        if error.path().is_some() {
            return error;
        }
        let mut path = alloc::string::String::from("$");
        for name in &self.names {
            path.push('.');
            path.push_str(name);
        }
        MapError::At {
            path,
            source: Box::new(error),
        }
    }
}

// -----------------------------------------------------------------------------
// Walker

/// Recursive serialize and deserialize over one top-level call.
///
/// Every top-level call creates its own walker, so its [`VisitedSet`] is
/// shared by the nested calls of that call only.
pub(crate) struct Walker<'m> {
    registry: &'m ConverterRegistry,
    visited: RefCell<VisitedSet>,
    #[cfg(feature = "debug")]
    path: RefCell<PropertyPath>,
}

impl<'m> Walker<'m> {
    pub(crate) fn new(registry: &'m ConverterRegistry) -> Self {
        Self {
            registry,
            visited: RefCell::new(VisitedSet::default()),
            #[cfg(feature = "debug")]
            path: RefCell::new(PropertyPath::default()),
        }
    }

    /// Serializes a top-level value.
    pub(crate) fn serialize(&self, value: &dyn Reflect) -> Result<Value, MapError> {
        let descriptor = TypeDescriptor::resolve(value.reflect_type_info());
        let resolved = self.registry.resolve(&PropertyMeta::root(), descriptor);
        self.apply_to_json(&resolved, value)
    }

    /// Deserializes a top-level value of type `info`.
    pub(crate) fn deserialize(
        &self,
        json: &Value,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, MapError> {
        let descriptor = TypeDescriptor::resolve(info);
        let resolved = self.registry.resolve(&PropertyMeta::root(), descriptor);
        match self.apply_from_json(&resolved, json, None)? {
            Decoded::Value(value) => Ok(value),
            Decoded::InPlace | Decoded::Absent => Err(MapError::conversion(
                resolved.converter().name(),
                "the document decodes to no value",
            )),
        }
    }

    /// Marks an object or a shared value as being serialized.
    ///
    /// Shared values are checked by the address of their allocation before
    /// they are locked.
    fn enter(&self, value: &dyn Reflect) -> Result<Option<VisitGuard<'_>>, MapError> {
        let addr = match value.reflect_ref() {
            ReflectRef::Object(_) => value.addr(),
            ReflectRef::Shared(shared) => shared.shared_addr(),
            _ => return Ok(None),
        };
        let identity = Identity {
            addr,
            ty: value.ty_id(),
        };

        if !self.visited.borrow_mut().insert(identity) {
            let type_path = value.reflect_type_info().type_path();
            log::debug!("circular reference to `{type_path}` at {addr:#x}");
            return Err(MapError::CircularReference { type_path });
        }
        Ok(Some(VisitGuard {
            visited: &self.visited,
            identity,
        }))
    }

    /// Runs `f` with `name` appended to the property path.
    #[inline]
    fn at_property<R>(
        &self,
        name: &'static str,
        f: impl FnOnce() -> Result<R, MapError>,
    ) -> Result<R, MapError> {
        #[cfg(feature = "debug")]
        {
            self.path.borrow_mut().names.push(name);
            let result = f().map_err(|error| self.path.borrow().locate(error));
            self.path.borrow_mut().names.pop();
            result
        }
        #[cfg(not(feature = "debug"))]
        {
            let _ = name;
            f()
        }
    }
}

impl CompositeHost for Walker<'_> {
    #[inline]
    fn resolve(&self, meta: &PropertyMeta, ty: &'static TypeDescriptor) -> Resolved {
        self.registry.resolve(meta, ty)
    }

    fn apply_to_json(&self, resolved: &Resolved, value: &dyn Reflect) -> Result<Value, MapError> {
        let _guard = self.enter(value)?;
        let ctx = Negotiator::for_serialize(resolved, self);
        resolved.converter().to_json(value, &ctx)
    }

    fn apply_from_json(
        &self,
        resolved: &Resolved,
        json: &Value,
        destination: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, MapError> {
        let mut ctx = Negotiator::for_deserialize(resolved, self, destination);
        resolved.converter().from_json(json, &mut ctx)
    }
}

impl RecursiveHost for Walker<'_> {
    fn serialize_object(&self, value: &dyn Reflect) -> Result<Value, MapError> {
        let object = value.reflect_ref().as_object().ok_or_else(|| {
            MapError::mismatch("an object", value.reflect_type_info().type_path())
        })?;
        let plan = ObjectPlan::of(value.reflect_type_info())?;

        let mut document = Map::new();
        for property in plan.mapped() {
            let meta = property.meta();
            let field = object.field_at(property.index()).ok_or_else(|| {
                MapError::unsupported(plan.type_path(), "field index out of range")
            })?;
            let resolved = self.registry.resolve(meta, property.descriptor());
            let json = self.at_property(meta.declared_name(), || {
                self.apply_to_json(&resolved, field)
            })?;
            document.insert(meta.wire_name().into(), json);
        }
        Ok(Value::Object(document))
    }

    fn deserialize_object(&self, json: &Value, info: &'static TypeInfo) -> Result<Decoded, MapError> {
        let Value::Object(document) = json else {
            return Err(MapError::unexpected_json("an object", json));
        };
        let plan = ObjectPlan::of(info)?;

        let mut builder = InstanceBuilder::begin(plan)?;
        for (key, json) in document {
            let Some(property) = plan.by_wire_name(key) else {
                log::debug!("skipping unknown key `{key}` of `{}`", plan.type_path());
                continue;
            };
            let resolved = self.registry.resolve(property.meta(), property.descriptor());
            let decoded = self.at_property(property.meta().declared_name(), || {
                self.apply_from_json(&resolved, json, builder.destination(property))
            })?;
            builder.accept(property, decoded)?;
        }
        Ok(Decoded::Value(builder.finish()?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use jm_reflect::derive::Reflect;

    use super::Walker;
    use crate::error::MapError;
    use crate::registry::ConverterRegistry;

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Link {
        id: u32,
        next: Option<Arc<RwLock<Link>>>,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Pair {
        left: Option<Arc<RwLock<Link>>>,
        right: Option<Arc<RwLock<Link>>>,
    }

    #[test]
    fn visited_set_is_cleared_on_every_exit() {
        let registry = ConverterRegistry::new();
        let walker = Walker::new(&registry);

        let node = Arc::new(RwLock::new(Link::default()));
        node.write().unwrap().next = Some(node.clone());
        let error = walker.serialize(&node).unwrap_err();
        assert!(matches!(error.root(), MapError::CircularReference { .. }));
        assert!(walker.visited.borrow().is_empty());

        // Break the cycle so the test does not leak.
        node.write().unwrap().next = None;
        assert!(walker.serialize(&node).is_ok());
        assert!(walker.visited.borrow().is_empty());
    }

    #[test]
    fn shared_but_acyclic_is_not_a_cycle() {
        let registry = ConverterRegistry::new();
        let shared = Arc::new(RwLock::new(Link { id: 4, next: None }));
        let pair = Pair {
            left: Some(shared.clone()),
            right: Some(shared),
        };
        let json = Walker::new(&registry).serialize(&pair).unwrap();
        assert_eq!(json["left"], json["right"]);
        assert_eq!(json["right"]["id"], 4);
    }

    #[cfg(feature = "debug")]
    #[test]
    fn errors_carry_the_property_path() {
        let registry = ConverterRegistry::new();
        let inner = Arc::new(RwLock::new(Link { id: 1, next: None }));
        let outer = Arc::new(RwLock::new(Link { id: 0, next: Some(inner.clone()) }));
        inner.write().unwrap().next = Some(outer.clone());

        let error = Walker::new(&registry).serialize(&outer).unwrap_err();
        assert_eq!(error.path(), Some("$.next.next"));

        inner.write().unwrap().next = None;
    }
}
