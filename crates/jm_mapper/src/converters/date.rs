use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use jm_reflect::Reflect;
use serde_json::Value;

use crate::converter::{Capabilities, ConvertContext, Converter, Decoded};
use crate::error::MapError;

/// The text form of dates without a `format` parameter.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// `chrono` dates: `NaiveDateTime`, `NaiveDate` and `DateTime<Utc>`.
///
/// A `format` parameter is a `strftime` pattern used in both directions.
/// Without one, dates are written as `2024-03-09 14:05:00.250` and read
/// from RFC 3339, that default form, its `T`-separated variant, a bare
/// date or a number of milliseconds since the epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateConverter;

impl Converter for DateConverter {
    fn name(&self) -> &'static str {
        "date"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TYPE_INFO
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let pattern = ctx.params().format();
        let mut text = String::with_capacity(32);
        let written = if let Some(v) = value.downcast_ref::<NaiveDateTime>() {
            write!(text, "{}", v.format(pattern.unwrap_or(DEFAULT_DATE_TIME_FORMAT)))
        } else if let Some(v) = value.downcast_ref::<DateTime<Utc>>() {
            write!(text, "{}", v.format(pattern.unwrap_or(DEFAULT_DATE_TIME_FORMAT)))
        } else if let Some(v) = value.downcast_ref::<NaiveDate>() {
            write!(text, "{}", v.format(pattern.unwrap_or(DEFAULT_DATE_FORMAT)))
        } else {
            return Err(MapError::unsupported(
                value.reflect_type_info().type_path(),
                "not a date type",
            ));
        };
        written.map_err(|_| ctx.failure(alloc::format!("invalid date pattern `{}`", pattern.unwrap_or_default())))?;
        Ok(Value::String(text))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let descriptor = ctx.descriptor()?;
        let date_time = match json {
            Value::String(text) => match ctx.params().format() {
                Some(pattern) => return parse_with(text, pattern, descriptor.id(), ctx).map(Decoded::Value),
                None => parse_generic(text).ok_or_else(|| ctx.failure(alloc::format!("`{text}` is not a date")))?,
            },
            Value::Number(millis) => millis
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|date_time| date_time.naive_utc())
                .ok_or_else(|| ctx.failure(alloc::format!("{millis} is not a timestamp")))?,
            Value::Null => return Ok(Decoded::Absent),
            other => return Err(MapError::unexpected_json("a date string", other)),
        };
        from_naive(date_time, descriptor.id(), descriptor.path()).map(Decoded::Value)
    }
}

fn from_naive(
    date_time: NaiveDateTime,
    id: core::any::TypeId,
    path: &'static str,
) -> Result<Box<dyn Reflect>, MapError> {
    use core::any::TypeId;
    if id == TypeId::of::<NaiveDateTime>() {
        Ok(Box::new(date_time))
    } else if id == TypeId::of::<DateTime<Utc>>() {
        Ok(Box::new(date_time.and_utc()))
    } else if id == TypeId::of::<NaiveDate>() {
        Ok(Box::new(date_time.date()))
    } else {
        Err(MapError::unsupported(path, "not a date type"))
    }
}

fn parse_with(
    text: &str,
    pattern: &str,
    id: core::any::TypeId,
    ctx: &ConvertContext<'_>,
) -> Result<Box<dyn Reflect>, MapError> {
    use core::any::TypeId;
    let failure = |error: chrono::ParseError| {
        ctx.failure(alloc::format!("`{text}` does not match `{pattern}`: {error}"))
    };

    if id == TypeId::of::<NaiveDate>() {
        return NaiveDate::parse_from_str(text, pattern)
            .map(|date| Box::new(date) as Box<dyn Reflect>)
            .map_err(failure);
    }
    if id == TypeId::of::<DateTime<Utc>>() {
        // Patterns with an offset keep it, the others are read as UTC.
        if let Ok(date_time) = DateTime::parse_from_str(text, pattern) {
            return Ok(Box::new(date_time.with_timezone(&Utc)));
        }
    }
    let date_time = NaiveDateTime::parse_from_str(text, pattern)
        .or_else(|error| {
            // Date-only patterns read as midnight.
            NaiveDate::parse_from_str(text, pattern)
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
                .map_err(|_| error)
        })
        .map_err(failure)?;
    from_naive(date_time, id, "date")
}

/// Reads the text forms accepted without a pattern.
fn parse_generic(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.naive_utc());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(date_time);
        }
    }
    NaiveDate::parse_from_str(text, DEFAULT_DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use jm_reflect::derive::Reflect;
    use serde_json::json;

    use crate::JsonMapper;
    use crate::error::MapError;
    use crate::meta::JsonProperty;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Event {
        at: NaiveDateTime,
        #[reflect(@JsonProperty::new().param("format", "%d/%m/%Y"))]
        day: NaiveDate,
        stamp: DateTime<Utc>,
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 0, 250)
            .unwrap()
    }

    #[test]
    fn default_text_and_pattern() {
        let mapper = JsonMapper::new();
        let event = Event {
            at: at(),
            day: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            stamp: at().and_utc(),
        };

        let json = mapper.to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({
                "at": "2024-03-09 14:05:00.250",
                "day": "31/01/2020",
                "stamp": "2024-03-09 14:05:00.250",
            })
        );
        assert_eq!(mapper.from_value::<Event>(&json).unwrap(), event);
    }

    #[test]
    fn generic_parse_forms() {
        let mapper = JsonMapper::new();
        for text in ["2024-03-09T14:05:00.250Z", "2024-03-09T14:05:00.25", "2024-03-09 14:05:00.250"] {
            let event: Event = mapper.from_value(&json!({ "at": text })).unwrap();
            assert_eq!(event.at, at(), "{text}");
        }

        let event: Event = mapper.from_value(&json!({ "stamp": 1_709_993_100_250_i64 })).unwrap();
        assert_eq!(event.stamp, at().and_utc());

        let event: Event = mapper.from_value(&json!({ "at": "2024-03-09" })).unwrap();
        assert_eq!(event.at, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn malformed_text_fails() {
        let mapper = JsonMapper::new();
        let error = mapper.from_value::<Event>(&json!({ "day": "2020-01-31" })).unwrap_err();
        assert!(matches!(error.root(), MapError::ConversionFailure { converter: "date", .. }));

        let error = mapper.from_value::<Event>(&json!({ "at": "soon" })).unwrap_err();
        assert!(matches!(error.root(), MapError::ConversionFailure { .. }));
    }
}
