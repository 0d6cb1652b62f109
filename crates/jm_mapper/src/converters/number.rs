use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::TypeId;
use core::str::FromStr;

use jm_reflect::Reflect;
use jm_reflect::descriptor::TypeDescriptor;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use super::passthrough::{serde_from_json, serde_to_json};
use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// The primitive number types handled by [`NumberConverter`].
pub(super) const NUMBER_TYPES: [fn() -> TypeId; 12] = [
    TypeId::of::<i8>,
    TypeId::of::<i16>,
    TypeId::of::<i32>,
    TypeId::of::<i64>,
    TypeId::of::<isize>,
    TypeId::of::<u8>,
    TypeId::of::<u16>,
    TypeId::of::<u32>,
    TypeId::of::<u64>,
    TypeId::of::<usize>,
    TypeId::of::<f32>,
    TypeId::of::<f64>,
];

// -----------------------------------------------------------------------------
// NumberPattern

/// A decimal-format pattern: `#`, `0`, `,` and `.`.
///
/// - integer part: `0` counts a minimum digit, the digits after the last
///   `,` give the grouping size;
/// - fraction part: `0` counts a minimum digit, `0` and `#` together give
///   the maximum.
///
/// Values are rounded half-even to the maximum fraction digits.
///
/// ```
/// use jm_mapper::converters::NumberPattern;
/// use rust_decimal::Decimal;
///
/// let pattern = NumberPattern::parse("#,##0.00").unwrap();
/// assert_eq!(pattern.format("1234567.891".parse::<Decimal>().unwrap()), "1,234,567.89");
/// assert_eq!(pattern.format(Decimal::from(-3)), "-3.00");
/// assert_eq!(pattern.parse_value("1,234.5"), Some("1234.5".parse().unwrap()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPattern {
    min_integer: usize,
    min_fraction: u32,
    max_fraction: u32,
    grouping: Option<usize>,
}

impl NumberPattern {
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let (integer, fraction) = pattern.split_once('.').unwrap_or((pattern, ""));

        if let Some(c) = integer.chars().find(|c| !matches!(c, '#' | '0' | ',')) {
            return Err(alloc::format!("unexpected `{c}` in number pattern `{pattern}`"));
        }
        if let Some(c) = fraction.chars().find(|c| !matches!(c, '#' | '0')) {
            return Err(alloc::format!("unexpected `{c}` in number pattern `{pattern}`"));
        }

        let grouping = match integer.rsplit_once(',') {
            Some((_, tail)) if tail.is_empty() => {
                return Err(alloc::format!("empty grouping in number pattern `{pattern}`"));
            }
            Some((_, tail)) => Some(tail.len()),
            None => None,
        };

        let count = |text: &str, digit: char| text.chars().filter(|&c| c == digit).count();
        Ok(Self {
            min_integer: count(integer, '0'),
            min_fraction: count(fraction, '0') as u32,
            max_fraction: fraction.len() as u32,
            grouping,
        })
    }

    /// Formats `value`; the integer part always has at least one digit.
    pub fn format(&self, value: Decimal) -> String {
        let rounded =
            value.round_dp_with_strategy(self.max_fraction, RoundingStrategy::MidpointNearestEven);
        let text = rounded.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((&text, ""));

        let integer = integer.trim_start_matches('0');
        let mut digits = String::with_capacity(self.min_integer.max(integer.len()) + 1);
        let width = self.min_integer.max(integer.len()).max(1);
        for _ in integer.len()..width {
            digits.push('0');
        }
        digits.push_str(integer);

        let mut out = String::with_capacity(digits.len() * 2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        match self.grouping {
            Some(size) => {
                for (i, c) in digits.chars().enumerate() {
                    if i > 0 && (digits.len() - i) % size == 0 {
                        out.push(',');
                    }
                    out.push(c);
                }
            }
            None => out.push_str(&digits),
        }

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while (fraction.len() as u32) < self.min_fraction {
            fraction.push('0');
        }
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(&fraction);
        }
        out
    }

    /// Parses text written in this pattern.
    ///
    /// Group separators may be left out, but those present must sit where
    /// the pattern puts them. Fraction digits beyond the pattern's maximum
    /// and separators in a pattern without grouping are rejected. Minimum
    /// digit counts are not enforced.
    pub fn parse_value(&self, text: &str) -> Option<Decimal> {
        let text = text.trim();
        let unsigned = text.strip_prefix('-').unwrap_or(text);
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if fraction.len() > self.max_fraction as usize || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if integer.contains(',') {
            let size = self.grouping?;
            let mut groups = integer.split(',');
            let head = groups.next()?;
            if head.is_empty() || head.len() > size || groups.any(|group| group.len() != size) {
                return None;
            }
        }
        let mut digits: String = integer.chars().filter(|&c| c != ',').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !fraction.is_empty() {
            digits.push('.');
            digits.push_str(fraction);
        }

        let value = Decimal::from_str(&digits).ok()?;
        Some(if text.starts_with('-') { -value } else { value })
    }
}

// -----------------------------------------------------------------------------
// NumberConverter

/// Primitive numbers.
///
/// Without a `format` parameter numbers pass through as JSON numbers. With
/// one, they are written as JSON strings in that [`NumberPattern`] and read
/// back with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberConverter;

impl Converter for NumberConverter {
    fn name(&self) -> &'static str {
        "number"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TYPE_INFO
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let Some(pattern) = ctx.params().format() else {
            return serde_to_json(value).unwrap_or_else(|| Err(not_a_number(value)));
        };
        let pattern = NumberPattern::parse(pattern).map_err(|message| ctx.failure(message))?;
        let decimal = to_decimal(value).ok_or_else(|| {
            ctx.failure(alloc::format!(
                "`{}` has no decimal form",
                value.reflect_type_info().type_path()
            ))
        })?;
        Ok(Value::String(pattern.format(decimal)))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let descriptor = ctx.descriptor()?;
        match json {
            Value::Number(_) => match serde_from_json(descriptor.info(), json) {
                Some(decoded) => decoded.map(Decoded::Value),
                None => Err(MapError::unsupported(descriptor.path(), "not a number type")),
            },
            Value::String(text) => {
                let Some(pattern) = ctx.params().format() else {
                    // Best effort without a pattern: an unreadable string leaves the default.
                    return match parse_plain(text) {
                        Some(decimal) => from_decimal(decimal, descriptor, ctx).map(Decoded::Value),
                        None => {
                            log::warn!("`{text}` is not a number, `{}` keeps its default", ctx.meta().declared_name());
                            Ok(Decoded::Absent)
                        }
                    };
                };
                let parsed = NumberPattern::parse(pattern)
                    .map_err(|message| ctx.failure(message))?
                    .parse_value(text)
                    .ok_or_else(|| ctx.failure(alloc::format!("`{text}` does not match `{pattern}`")))?;
                from_decimal(parsed, descriptor, ctx).map(Decoded::Value)
            }
            Value::Null => Ok(Decoded::Absent),
            other => Err(MapError::unexpected_json("a number", other)),
        }
    }
}

fn not_a_number(value: &dyn Reflect) -> MapError {
    MapError::unsupported(value.reflect_type_info().type_path(), "not a number type")
}

fn parse_plain(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// The decimal value of a primitive number.
pub(super) fn to_decimal(value: &dyn Reflect) -> Option<Decimal> {
    macro_rules! integers {
        ($($ty:ty => $wide:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return Some(Decimal::from(*v as $wide));
                }
            )*
        };
    }
    integers!(i8 => i64, i16 => i64, i32 => i64, i64 => i64, isize => i64,
        u8 => u64, u16 => u64, u32 => u64, u64 => u64, usize => u64);

    // Floats go through their shortest round-trip text, not their binary value.
    if let Some(v) = value.downcast_ref::<f64>() {
        return Decimal::from_str(&v.to_string()).ok();
    }
    if let Some(v) = value.downcast_ref::<f32>() {
        return Decimal::from_str(&v.to_string()).ok();
    }
    None
}

/// Converts a decimal into the primitive number type of `descriptor`.
fn from_decimal(
    decimal: Decimal,
    descriptor: &TypeDescriptor,
    ctx: &ConvertContext<'_>,
) -> Result<Box<dyn Reflect>, MapError> {
    let id = descriptor.id();
    let out_of_range = || ctx.failure(alloc::format!("{decimal} does not fit `{}`", descriptor.path()));

    if id == TypeId::of::<f64>() {
        return decimal.to_f64().map(|v| Box::new(v) as Box<dyn Reflect>).ok_or_else(out_of_range);
    }
    if id == TypeId::of::<f32>() {
        return decimal.to_f32().map(|v| Box::new(v) as Box<dyn Reflect>).ok_or_else(out_of_range);
    }
    if !decimal.fract().is_zero() {
        return Err(ctx.failure(alloc::format!("{decimal} is not an integer")));
    }

    macro_rules! integers {
        ($($ty:ty => $to:ident),*) => {
            $(
                if id == TypeId::of::<$ty>() {
                    return decimal.$to().map(|v| Box::new(v) as Box<dyn Reflect>).ok_or_else(out_of_range);
                }
            )*
        };
    }
    integers!(i8 => to_i8, i16 => to_i16, i32 => to_i32, i64 => to_i64, isize => to_isize,
        u8 => to_u8, u16 => to_u16, u32 => to_u32, u64 => to_u64, usize => to_usize);

    Err(MapError::unsupported(descriptor.path(), "not a number type"))
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{NumberConverter, NumberPattern};
    use crate::JsonMapper;
    use crate::error::MapError;
    use crate::meta::JsonProperty;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn pattern_rounds_half_even() {
        let pattern = NumberPattern::parse("##.##").unwrap();
        assert_eq!(pattern.format(dec("1200000.246")), "1200000.25");
        assert_eq!(pattern.format(dec("0.125")), "0.12");
        assert_eq!(pattern.format(dec("0.135")), "0.14");
        assert_eq!(pattern.format(dec("2.50")), "2.5");
        assert_eq!(pattern.format(dec("-0.001")), "0");

        let padded = NumberPattern::parse("000.0").unwrap();
        assert_eq!(padded.format(dec("7")), "007.0");
    }

    #[test]
    fn parsing_follows_the_pattern() {
        let grouped = NumberPattern::parse("#,##0.00").unwrap();
        assert_eq!(grouped.parse_value("1,234,567.89"), Some(dec("1234567.89")));
        assert_eq!(grouped.parse_value("1234567.8"), Some(dec("1234567.8")));
        assert_eq!(grouped.parse_value("-0.5"), Some(dec("-0.5")));
        assert_eq!(grouped.parse_value("12,34.00"), None);
        assert_eq!(grouped.parse_value("1,234.567"), None);
        assert_eq!(grouped.parse_value(",123"), None);
        assert_eq!(grouped.parse_value("1e3"), None);

        let plain = NumberPattern::parse("##.##").unwrap();
        assert_eq!(plain.parse_value("1200000.25"), Some(dec("1200000.25")));
        assert_eq!(plain.parse_value("1,200"), None);

        let whole = NumberPattern::parse("#").unwrap();
        assert_eq!(whole.parse_value("42"), Some(dec("42")));
        assert_eq!(whole.parse_value("4.2"), None);
    }

    #[test]
    fn pattern_rejects_unknown_symbols() {
        assert!(NumberPattern::parse("#.#%").is_err());
        assert!(NumberPattern::parse("#,.#").is_err());
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Reading {
        #[reflect(@JsonProperty::new().converter(NumberConverter).param("format", "##.##"))]
        value: f64,
        #[reflect(@JsonProperty::new().param("format", "#,###"))]
        count: u32,
        plain: i16,
    }

    #[test]
    fn formatted_numbers_are_strings() {
        let mapper = JsonMapper::new();
        let reading = Reading { value: 1200000.246, count: 1234567, plain: -4 };

        let json = mapper.to_value(&reading).unwrap();
        assert_eq!(json, json!({ "value": "1200000.25", "count": "1,234,567", "plain": -4 }));

        let back: Reading = mapper.from_value(&json).unwrap();
        assert_eq!(back, Reading { value: 1200000.25, ..reading });
    }

    #[test]
    fn strings_without_pattern_are_best_effort() {
        let mapper = JsonMapper::new();
        let back: Reading = mapper.from_value(&json!({ "plain": "12" })).unwrap();
        assert_eq!(back.plain, 12);

        let back: Reading = mapper.from_value(&json!({ "plain": "twelve" })).unwrap();
        assert_eq!(back.plain, 0);

        let error = mapper.from_value::<Reading>(&json!({ "count": "x1" })).unwrap_err();
        assert!(matches!(error.root(), MapError::ConversionFailure { converter: "number", .. }));
        let error = mapper.from_value::<Reading>(&json!({ "count": "12,34" })).unwrap_err();
        assert!(matches!(error.root(), MapError::ConversionFailure { converter: "number", .. }));

        let error = mapper.from_value::<Reading>(&json!({ "plain": 70000 })).unwrap_err();
        assert!(matches!(error.root(), MapError::Json(_)));
    }
}
