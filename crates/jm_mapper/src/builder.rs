use alloc::boxed::Box;

use jm_reflect::Reflect;
use jm_reflect::ops::NamedArgs;

use crate::converter::Decoded;
use crate::error::MapError;
use crate::plan::{ObjectPlan, PlanProperty, Strategy};

// -----------------------------------------------------------------------------
// InstanceBuilder

/// An object under construction.
///
/// The strategy is fixed by the [`ObjectPlan`]: a mutable target is
/// allocated up front and its fields are assigned as values arrive, an
/// immutable target only collects arguments and is constructed once in
/// [`finish`](Self::finish).
pub(crate) struct InstanceBuilder {
    plan: &'static ObjectPlan,
    pending: Pending,
}

enum Pending {
    Mutable(Box<dyn Reflect>),
    Immutable(NamedArgs),
}

impl InstanceBuilder {
    pub(crate) fn begin(plan: &'static ObjectPlan) -> Result<Self, MapError> {
        let pending = match plan.strategy() {
            Strategy::Mutable(default) => Pending::Mutable(default()),
            Strategy::Immutable(_) => Pending::Immutable(NamedArgs::new()),
            Strategy::Unsupported => {
                return Err(MapError::unsupported(
                    plan.type_path(),
                    "no default constructor and no named-argument constructor",
                ));
            }
        };
        Ok(Self { plan, pending })
    }

    /// The current value of a field, for in-place refills.
    ///
    /// Always `None` on the immutable path.
    pub(crate) fn destination(&mut self, property: &PlanProperty) -> Option<&mut dyn Reflect> {
        match &mut self.pending {
            Pending::Mutable(target) => target
                .reflect_mut()
                .as_object()?
                .field_at_mut(property.index()),
            Pending::Immutable(_) => None,
        }
    }

    /// Stores the decoded value of `property`.
    pub(crate) fn accept(&mut self, property: &PlanProperty, decoded: Decoded) -> Result<(), MapError> {
        let Decoded::Value(value) = decoded else {
            return Ok(());
        };
        match &mut self.pending {
            Pending::Mutable(target) => {
                let field = target
                    .reflect_mut()
                    .as_object()
                    .and_then(|object| object.field_at_mut(property.index()))
                    .ok_or_else(|| {
                        MapError::unsupported(self.plan.type_path(), "field index out of range")
                    })?;
                field.set(value).map_err(|value| {
                    MapError::mismatch(
                        property.descriptor().path(),
                        value.reflect_type_info().type_path(),
                    )
                })
            }
            Pending::Immutable(args) => {
                args.insert(property.meta().declared_name(), value);
                Ok(())
            }
        }
    }

    /// Completes the object.
    pub(crate) fn finish(self) -> Result<Box<dyn Reflect>, MapError> {
        match (self.pending, self.plan.strategy()) {
            (Pending::Mutable(target), _) => Ok(target),
            (Pending::Immutable(args), Strategy::Immutable(constructor)) => Ok(constructor.call(args)?),
            (Pending::Immutable(_), _) => Err(MapError::unsupported(
                self.plan.type_path(),
                "named-argument constructor disappeared",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use jm_reflect::info::Typed;

    use super::InstanceBuilder;
    use crate::converter::Decoded;
    use crate::error::MapError;
    use crate::plan::ObjectPlan;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Settings {
        volume: u8,
        tags: Vec<String>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(constructor)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Reflect)]
    struct Handle {
        raw: u32,
    }

    #[test]
    fn mutable_path_assigns_fields() {
        let plan = ObjectPlan::of(Settings::type_info()).unwrap();
        let volume = plan.by_wire_name("volume").unwrap();
        let tags = plan.by_wire_name("tags").unwrap();

        let mut builder = InstanceBuilder::begin(plan).unwrap();
        builder.accept(volume, Decoded::Value(Box::new(7_u8))).unwrap();

        let existing = builder.destination(tags).unwrap();
        existing.downcast_mut::<Vec<String>>().unwrap().push("a".into());
        builder.accept(tags, Decoded::InPlace).unwrap();

        let error = builder.accept(volume, Decoded::Value(Box::new(7_i64))).unwrap_err();
        assert!(matches!(error, MapError::TypeMismatch { .. }));

        let built = builder.finish().unwrap().take::<Settings>().unwrap();
        assert_eq!(built, Settings { volume: 7, tags: vec!["a".into()] });
    }

    #[test]
    fn immutable_path_constructs_once() {
        let plan = ObjectPlan::of(Point::type_info()).unwrap();
        let x = plan.by_wire_name("x").unwrap();

        let mut builder = InstanceBuilder::begin(plan).unwrap();
        assert!(builder.destination(x).is_none());
        builder.accept(x, Decoded::Value(Box::new(-3_i32))).unwrap();
        builder.accept(x, Decoded::Absent).unwrap();

        let built = builder.finish().unwrap().take::<Point>().unwrap();
        assert_eq!(built, Point { x: -3, y: 0 });
    }

    #[test]
    fn no_constructor_is_unsupported() {
        let plan = ObjectPlan::of(Handle::type_info()).unwrap();
        let error = InstanceBuilder::begin(plan).err().unwrap();
        assert!(matches!(error, MapError::UnsupportedType { .. }));
    }
}
