use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use jm_reflect::Reflect;
use serde_json::Value;

use crate::converter::{ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// An interned-style name, compared and written by its text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

jm_reflect::impl_reflect_scalar!(Symbol);

impl Symbol {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    #[inline]
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    #[inline]
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// [`Symbol`]s as their name.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolConverter;

impl Converter for SymbolConverter {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let symbol = value.downcast_ref::<Symbol>().ok_or_else(|| {
            MapError::mismatch("Symbol", value.reflect_type_info().type_path())
        })?;
        Ok(Value::String(symbol.0.clone()))
    }

    fn from_json(&self, json: &Value, _ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        match json {
            Value::String(name) => Ok(Decoded::Value(Box::new(Symbol::new(name.as_str())))),
            Value::Null => Ok(Decoded::Absent),
            other => Err(MapError::unexpected_json("a symbol name", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Symbol;
    use crate::JsonMapper;

    #[test]
    fn symbols_by_name() {
        let mapper = JsonMapper::new();
        let json = mapper.to_value(&Symbol::from("ready")).unwrap();
        assert_eq!(json, json!("ready"));
        assert_eq!(mapper.from_value::<Symbol>(&json).unwrap().name(), "ready");
    }
}
