use alloc::string::String;
use alloc::vec::Vec;

use jm_reflect::Reflect;
use jm_reflect::info::MapInfo;
use jm_reflect::ops::Map as ReflectMap;
use serde_json::{Map, Value};

use super::resolve_param;
use crate::converter::{Capabilities, CompositeHost, ConvertContext, Converter, Decoded};
use crate::error::MapError;
use crate::registry::Resolved;

/// Maps as JSON objects.
///
/// Keys and values are converted through the engine with the converters
/// resolved for the key and value types. JSON object keys are text, so a
/// key that does not convert to a string is written as its compact JSON
/// text, and read back from it.
///
/// With a destination instance the map is cleared and refilled in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapConverter;

impl Converter for MapConverter {
    fn name(&self) -> &'static str {
        "map"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::COMPOSITE | Capabilities::TYPE_INFO | Capabilities::MAP_INSTANCE
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let map = value.reflect_ref().as_map().ok_or_else(|| {
            MapError::mismatch("a map", value.reflect_type_info().type_path())
        })?;
        let host = ctx.composite()?;
        let key_resolved = resolve_param(ctx, 0)?;
        let value_resolved = resolve_param(ctx, 1)?;

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            let key = match host.apply_to_json(&key_resolved, key)? {
                Value::String(text) => text,
                other => other.to_string(),
            };
            entries.push((key, host.apply_to_json(&value_resolved, value)?));
        }
        // Hash maps iterate in a different order on every run.
        if !value.reflect_type_info().as_map().is_some_and(MapInfo::is_ordered) {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        Ok(Value::Object(entries.into_iter().collect()))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let document = match json {
            Value::Object(document) => document,
            Value::Null => return Ok(Decoded::Absent),
            other => return Err(MapError::unexpected_json("an object", other)),
        };
        let descriptor = ctx.descriptor()?;
        let host = ctx.composite()?;
        let key_resolved = resolve_param(ctx, 0)?;
        let value_resolved = resolve_param(ctx, 1)?;
        let entries = Entries {
            host,
            key: &key_resolved,
            value: &value_resolved,
            type_path: descriptor.path(),
        };

        if let Some(destination) = ctx.take_destination() {
            let map = destination
                .reflect_mut()
                .as_map()
                .ok_or_else(|| MapError::mismatch(descriptor.path(), "a non-map destination"))?;
            map.clear();
            entries.fill(map, document)?;
            return Ok(Decoded::InPlace);
        }

        let info = descriptor
            .info()
            .as_map()
            .ok_or_else(|| MapError::unsupported(descriptor.path(), "not a map type"))?;
        let mut fresh = info.empty();
        let map = fresh
            .reflect_mut()
            .as_map()
            .ok_or_else(|| MapError::unsupported(descriptor.path(), "not a map type"))?;
        entries.fill(map, document)?;
        Ok(Decoded::Value(fresh))
    }
}

struct Entries<'a> {
    host: &'a dyn CompositeHost,
    key: &'a Resolved,
    value: &'a Resolved,
    type_path: &'static str,
}

impl Entries<'_> {
    fn fill(&self, map: &mut dyn ReflectMap, document: &Map<String, Value>) -> Result<(), MapError> {
        for (key, json) in document {
            let Some(decoded_key) = self.decode_key(key)?.into_value() else {
                log::warn!("skipping entry `{key}` of `{}`, its key decodes to no value", self.type_path);
                continue;
            };
            let Some(decoded_value) = self.host.apply_from_json(self.value, json, None)?.into_value() else {
                log::warn!("skipping entry `{key}` of `{}`, its value decodes to no value", self.type_path);
                continue;
            };
            map.insert(decoded_key, decoded_value).map_err(|(key, _)| {
                MapError::mismatch(self.key.descriptor().path(), key.reflect_type_info().type_path())
            })?;
        }
        Ok(())
    }

    /// Decodes a key from its text, then from the JSON literal the text holds.
    fn decode_key(&self, key: &str) -> Result<Decoded, MapError> {
        let text = Value::String(key.into());
        let result = self.host.apply_from_json(self.key, &text, None);
        if matches!(result, Ok(Decoded::Absent) | Err(_))
            && let Ok(literal) = serde_json::from_str::<Value>(key)
            && !literal.is_string()
        {
            return self.host.apply_from_json(self.key, &literal, None);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::converters::EnumConverter;
    use crate::meta::JsonProperty;

    #[derive(Reflect, Default, Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
    enum Slot {
        #[default]
        Head,
        Body,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Inventory {
        counts: BTreeMap<u32, bool>,
        #[reflect(@JsonProperty::new().converter(EnumConverter::index()))]
        slots: BTreeMap<Slot, Slot>,
        labels: HashMap<String, String>,
    }

    #[test]
    fn keys_are_text() {
        let mapper = JsonMapper::new();
        let inventory = Inventory {
            counts: BTreeMap::from([(2, true), (10, false)]),
            slots: BTreeMap::from([(Slot::Body, Slot::Head)]),
            labels: HashMap::from([("a".into(), "b".into())]),
        };

        let json = mapper.to_value(&inventory).unwrap();
        assert_eq!(
            json,
            json!({
                "counts": { "2": true, "10": false },
                "slots": { "1": 0 },
                "labels": { "a": "b" },
            })
        );
        assert_eq!(mapper.from_value::<Inventory>(&json).unwrap(), inventory);
    }

    #[test]
    fn destination_is_refilled() {
        let mapper = JsonMapper::new();
        let json = json!({ "counts": { "7": true } });
        let inventory: Inventory = mapper.from_value(&json).unwrap();
        assert_eq!(inventory.counts, BTreeMap::from([(7, true)]));
        assert!(inventory.labels.is_empty());
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Preset {
        levels: BTreeMap<String, u8>,
    }

    impl Default for Preset {
        fn default() -> Self {
            Self {
                levels: BTreeMap::from([("gain".into(), 5), ("pan".into(), 0)]),
            }
        }
    }

    #[test]
    fn default_entries_are_replaced() {
        let mapper = JsonMapper::new();
        let preset: Preset = mapper.from_value(&json!({ "levels": { "bass": 3 } })).unwrap();
        assert_eq!(preset.levels, BTreeMap::from([("bass".into(), 3)]));

        // A missing key keeps the defaults.
        let preset: Preset = mapper.from_value(&json!({})).unwrap();
        assert_eq!(preset, Preset::default());
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Lookup {
        names: HashMap<String, u32>,
        ids: HashMap<u16, String>,
    }

    #[test]
    fn hash_maps_are_written_in_key_order() {
        let mapper = JsonMapper::new();
        let lookup = Lookup {
            names: (0..20).map(|i| (format!("n{i:02}"), i)).collect(),
            ids: HashMap::from([(30, "c".into()), (4, "a".into()), (100, "b".into())]),
        };

        let json = mapper.to_value(&lookup).unwrap();
        let names: Vec<&String> = json["names"].as_object().unwrap().keys().collect();
        let sorted: Vec<String> = (0..20).map(|i| format!("n{i:02}")).collect();
        assert_eq!(names, sorted.iter().collect::<Vec<_>>());

        let text = mapper.serialize(&lookup).unwrap();
        // Keys sort as text.
        assert!(text.contains("\"ids\": {\n  \"100\": \"b\",\n  \"30\": \"c\",\n  \"4\": \"a\"\n }"));

        let back: Lookup = mapper.deserialize(&text).unwrap();
        assert_eq!(back, lookup);
        for _ in 0..5 {
            assert_eq!(mapper.serialize(&back).unwrap(), text);
        }
    }
}
