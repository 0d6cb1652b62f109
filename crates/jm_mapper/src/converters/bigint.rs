use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::TypeId;
use core::str::FromStr;

use jm_reflect::Reflect;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// Wide integers and decimals as exact decimal text.
///
/// `i128`, `u128` and `Decimal` do not fit a JSON number without losing
/// precision, so they are written as strings. Numbers are still accepted
/// on the way in.
#[derive(Clone, Copy, Debug, Default)]
pub struct BigIntConverter;

impl Converter for BigIntConverter {
    fn name(&self) -> &'static str {
        "bigint"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TYPE_INFO
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let text = if let Some(v) = value.downcast_ref::<i128>() {
            v.to_string()
        } else if let Some(v) = value.downcast_ref::<u128>() {
            v.to_string()
        } else if let Some(v) = value.downcast_ref::<Decimal>() {
            v.normalize().to_string()
        } else {
            return Err(MapError::unsupported(
                value.reflect_type_info().type_path(),
                "not a wide number type",
            ));
        };
        Ok(Value::String(text))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let descriptor = ctx.descriptor()?;
        let number;
        let text = match json {
            Value::String(text) => text.trim(),
            Value::Number(value) => {
                number = value.to_string();
                number.as_str()
            }
            Value::Null => return Ok(Decoded::Absent),
            other => return Err(MapError::unexpected_json("a number string", other)),
        };

        let id = descriptor.id();
        let value: Option<Box<dyn Reflect>> = if id == TypeId::of::<i128>() {
            text.parse::<i128>().ok().map(|v| Box::new(v) as Box<dyn Reflect>)
        } else if id == TypeId::of::<u128>() {
            text.parse::<u128>().ok().map(|v| Box::new(v) as Box<dyn Reflect>)
        } else if id == TypeId::of::<Decimal>() {
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
                .map(|v| Box::new(v) as Box<dyn Reflect>)
        } else {
            return Err(MapError::unsupported(descriptor.path(), "not a wide number type"));
        };

        value.map(Decoded::Value).ok_or_else(|| {
            ctx.failure(alloc::format!("`{text}` is not a valid `{}`", descriptor.path()))
        })
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use jm_reflect::derive::Reflect;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Ledger {
        total: i128,
        supply: u128,
        rate: Decimal,
    }

    #[test]
    fn wide_numbers_as_strings() {
        let mapper = JsonMapper::new();
        let ledger = Ledger {
            total: i128::MIN,
            supply: u128::MAX,
            rate: Decimal::from_str("0.0725").unwrap(),
        };

        let json = mapper.to_value(&ledger).unwrap();
        assert_eq!(json["total"], json!("-170141183460469231731687303715884105728"));
        assert_eq!(json["supply"], json!("340282366920938463463374607431768211455"));
        assert_eq!(json["rate"], json!("0.0725"));
        assert_eq!(mapper.from_value::<Ledger>(&json).unwrap(), ledger);
    }

    #[test]
    fn numbers_are_accepted() {
        let mapper = JsonMapper::new();
        let ledger: Ledger = mapper.from_value(&json!({ "total": -5, "rate": 1.5 })).unwrap();
        assert_eq!(ledger.total, -5);
        assert_eq!(ledger.rate, Decimal::from_str("1.5").unwrap());

        let error = mapper.from_value::<Ledger>(&json!({ "supply": "-1" })).unwrap_err();
        assert!(matches!(error.root(), MapError::ConversionFailure { converter: "bigint", .. }));
    }
}
