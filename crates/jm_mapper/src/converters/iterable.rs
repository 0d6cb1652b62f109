use alloc::boxed::Box;
use alloc::vec::Vec;

use jm_reflect::Reflect;
use jm_reflect::info::{SetInfo, TypeInfo};
use jm_reflect::ops::{ReflectMut, ReflectRef};
use serde_json::Value;

use super::resolve_param;
use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// Lists and sets as JSON arrays, element by element through the engine.
///
/// Elements that decode to no value are skipped. With a destination
/// instance the collection is cleared and refilled in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct IterableConverter;

impl Converter for IterableConverter {
    fn name(&self) -> &'static str {
        "iterable"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::COMPOSITE | Capabilities::TYPE_INFO | Capabilities::ITERABLE_INSTANCE
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let (items, sort) = match value.reflect_ref() {
            ReflectRef::List(list) => (list.iter(), false),
            ReflectRef::Set(set) => {
                let ordered = value.reflect_type_info().as_set().is_some_and(SetInfo::is_ordered);
                (set.iter(), !ordered)
            }
            _ => {
                return Err(MapError::mismatch(
                    "a list or a set",
                    value.reflect_type_info().type_path(),
                ));
            }
        };
        let host = ctx.composite()?;
        let resolved = resolve_param(ctx, 0)?;
        let mut array = items
            .map(|item| host.apply_to_json(&resolved, item))
            .collect::<Result<Vec<_>, _>>()?;
        // Hash sets iterate in a different order on every run.
        if sort {
            array.sort_by_cached_key(Value::to_string);
        }
        Ok(Value::Array(array))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let items = match json {
            Value::Array(items) => items,
            Value::Null => return Ok(Decoded::Absent),
            other => return Err(MapError::unexpected_json("an array", other)),
        };
        let descriptor = ctx.descriptor()?;
        let host = ctx.composite()?;
        let resolved = resolve_param(ctx, 0)?;

        let mut decoded = Vec::with_capacity(items.len());
        for item in items {
            match host.apply_from_json(&resolved, item, None)?.into_value() {
                Some(value) => decoded.push(value),
                None => log::debug!("skipping an element of `{}` that decodes to no value", descriptor.path()),
            }
        }

        let fill = |target: &mut dyn Reflect| -> Result<(), MapError> {
            clear(target);
            for value in decoded {
                insert(target, value).map_err(|value| {
                    MapError::mismatch(descriptor.path(), value.reflect_type_info().type_path())
                })?;
            }
            Ok(())
        };

        if let Some(destination) = ctx.take_destination() {
            fill(destination)?;
            return Ok(Decoded::InPlace);
        }

        let mut fresh = match descriptor.info() {
            TypeInfo::List(info) => info.empty(),
            TypeInfo::Set(info) => info.empty(),
            _ => return Err(MapError::unsupported(descriptor.path(), "not a list or a set")),
        };
        fill(&mut *fresh)?;
        Ok(Decoded::Value(fresh))
    }
}

fn clear(target: &mut dyn Reflect) {
    match target.reflect_mut() {
        ReflectMut::List(list) => list.clear(),
        ReflectMut::Set(set) => set.clear(),
        _ => {}
    }
}

fn insert(target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
    match target.reflect_mut() {
        ReflectMut::List(list) => list.push(value),
        ReflectMut::Set(set) => set.insert(value).map(drop),
        _ => Err(value),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet, VecDeque};

    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Batch {
        ids: Vec<u32>,
        tags: BTreeSet<String>,
        queue: VecDeque<Vec<i8>>,
    }

    #[test]
    fn lists_and_sets_as_arrays() {
        let mapper = JsonMapper::new();
        let batch = Batch {
            ids: vec![3, 1, 2],
            tags: BTreeSet::from(["b".into(), "a".into()]),
            queue: VecDeque::from([vec![-1], vec![]]),
        };

        let json = mapper.to_value(&batch).unwrap();
        assert_eq!(json, json!({ "ids": [3, 1, 2], "tags": ["a", "b"], "queue": [[-1], []] }));
        assert_eq!(mapper.from_value::<Batch>(&json).unwrap(), batch);
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Recent {
        ids: Vec<u32>,
        seen: BTreeSet<u32>,
    }

    impl Default for Recent {
        fn default() -> Self {
            let mut ids = Vec::with_capacity(64);
            ids.extend([9, 9, 9]);
            Self {
                ids,
                seen: BTreeSet::from([9]),
            }
        }
    }

    #[test]
    fn default_elements_are_replaced_in_place() {
        let mapper = JsonMapper::new();
        let recent: Recent = mapper.from_value(&json!({ "ids": [1], "seen": [2, 3] })).unwrap();
        assert_eq!(recent.ids, [1]);
        assert_eq!(recent.seen, BTreeSet::from([2, 3]));
        // The default allocation was kept, a fresh vector would be sized to the input.
        assert!(recent.ids.capacity() >= 64);
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Crowd {
        names: HashSet<String>,
        codes: HashSet<i32>,
    }

    #[test]
    fn hash_sets_are_written_in_a_stable_order() {
        let mapper = JsonMapper::new();
        let crowd = Crowd {
            names: (0..20).map(|i| format!("p{i:02}")).collect(),
            codes: HashSet::from([12, -1, 3]),
        };

        let json = mapper.to_value(&crowd).unwrap();
        let names: Vec<String> = (0..20).map(|i| format!("p{i:02}")).collect();
        assert_eq!(json["names"], json!(names));
        assert_eq!(json["codes"], json!([-1, 12, 3]));

        let text = mapper.serialize(&crowd).unwrap();
        let back: Crowd = mapper.deserialize(&text).unwrap();
        assert_eq!(back, crowd);
        for _ in 0..5 {
            assert_eq!(mapper.serialize(&back).unwrap(), text);
        }
    }

    #[test]
    fn top_level_collections() {
        let mapper = JsonMapper::new();
        let ids: Vec<u32> = mapper.from_value(&json!([4, 5])).unwrap();
        assert_eq!(ids, [4, 5]);

        let error = mapper.from_value::<Vec<u32>>(&json!({ "a": 1 })).unwrap_err();
        assert!(matches!(error, MapError::TypeMismatch { .. }));
    }
}
