use jm_reflect::Reflect;
use serde_json::Value;

use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;
use crate::meta::EnumMembers;

/// How an [`EnumConverter`] writes a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumEncoding {
    /// `"Color.Black"`
    FullName,
    /// `"Black"`
    ShortName,
    /// The member's position in the member list.
    Index,
}

/// Field-less enums, against an injected member list.
///
/// The member list is the one declared with
/// [`JsonProperty::enum_values`](crate::JsonProperty::enum_values), or the
/// variants of the declared enum type. A JSON value that names no member
/// decodes to [`Decoded::Absent`].
#[derive(Clone, Copy, Debug)]
pub struct EnumConverter {
    encoding: EnumEncoding,
}

impl EnumConverter {
    #[inline]
    pub const fn new(encoding: EnumEncoding) -> Self {
        Self { encoding }
    }

    /// `"Type.Member"`, the default for enum properties.
    #[inline]
    pub const fn full_name() -> Self {
        Self::new(EnumEncoding::FullName)
    }

    #[inline]
    pub const fn short_name() -> Self {
        Self::new(EnumEncoding::ShortName)
    }

    #[inline]
    pub const fn index() -> Self {
        Self::new(EnumEncoding::Index)
    }

    #[inline]
    pub fn encoding(&self) -> EnumEncoding {
        self.encoding
    }

    fn lookup(&self, json: &Value, members: &EnumMembers) -> Option<usize> {
        match self.encoding {
            EnumEncoding::FullName => {
                let text = json.as_str()?;
                (0..members.len()).find(|&i| members.full_name(i).as_deref() == Some(text))
            }
            EnumEncoding::ShortName => {
                let text = json.as_str()?;
                // A trailing segment of the full name, or the full name itself.
                (0..members.len()).find(|&i| {
                    members.full_name(i).is_some_and(|full| match full.strip_suffix(text) {
                        Some(head) => head.is_empty() || head.ends_with('.'),
                        None => false,
                    })
                })
            }
            EnumEncoding::Index => {
                let index = match json {
                    Value::Number(number) => number.as_u64()?,
                    // Map keys arrive as strings.
                    Value::String(text) => text.parse().ok()?,
                    _ => return None,
                };
                usize::try_from(index).ok().filter(|&i| i < members.len())
            }
        }
    }
}

impl Converter for EnumConverter {
    fn name(&self) -> &'static str {
        match self.encoding {
            EnumEncoding::FullName => "enum-full-name",
            EnumEncoding::ShortName => "enum-short-name",
            EnumEncoding::Index => "enum-index",
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ENUM_MEMBERS
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let members = ctx.enum_members()?;
        let variant = value.reflect_ref().as_enum().ok_or_else(|| {
            MapError::mismatch("an enum", value.reflect_type_info().type_path())
        })?;

        let name = variant.variant_name();
        let index = members.index_of(name).ok_or_else(|| {
            ctx.failure(alloc::format!("`{name}` is not a member of `{}`", members.type_name()))
        })?;

        Ok(match self.encoding {
            EnumEncoding::FullName => Value::String(alloc::format!("{}.{name}", members.type_name())),
            EnumEncoding::ShortName => Value::String(name.into()),
            EnumEncoding::Index => Value::from(index),
        })
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let members = ctx.enum_members()?;
        match self.lookup(json, &members).and_then(|index| members.variant(index)) {
            Some(value) => Ok(Decoded::Value(value)),
            None => {
                log::warn!(
                    "{json} names no member of `{}`, `{}` is left unset",
                    members.type_name(),
                    ctx.meta().declared_name(),
                );
                Ok(Decoded::Absent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use super::EnumConverter;
    use crate::JsonMapper;
    use crate::meta::JsonProperty;

    #[derive(Reflect, Default, Debug, PartialEq, Clone, Copy)]
    enum Tone {
        #[default]
        Low,
        High,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Mixer {
        main: Tone,
        #[reflect(@JsonProperty::new().converter(EnumConverter::short_name()))]
        aux: Tone,
        #[reflect(@JsonProperty::new().converter(EnumConverter::index()))]
        history: Vec<Tone>,
    }

    #[test]
    fn three_encodings() {
        let mapper = JsonMapper::new();
        let mixer = Mixer {
            main: Tone::High,
            aux: Tone::High,
            history: vec![Tone::High, Tone::Low],
        };

        let json = mapper.to_value(&mixer).unwrap();
        assert_eq!(json, json!({ "main": "Tone.High", "aux": "High", "history": [1, 0] }));
        assert_eq!(mapper.from_value::<Mixer>(&json).unwrap(), mixer);
    }

    #[test]
    fn unknown_members_are_absent() {
        let mapper = JsonMapper::new();
        let json = json!({ "main": "Tone.Mid", "aux": "igh", "history": [7, 1] });
        let mixer: Mixer = mapper.from_value(&json).unwrap();
        assert_eq!(mixer, Mixer { history: vec![Tone::High], ..Mixer::default() });
    }

    #[test]
    fn short_names_accept_the_full_name() {
        let mapper = JsonMapper::new();
        let mixer: Mixer = mapper.from_value(&json!({ "aux": "Tone.High" })).unwrap();
        assert_eq!(mixer.aux, Tone::High);

        let mixer: Mixer = mapper.from_value(&json!({ "aux": "High" })).unwrap();
        assert_eq!(mixer.aux, Tone::High);
    }
}
