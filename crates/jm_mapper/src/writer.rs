use alloc::string::String;
use alloc::vec::Vec;

use serde_core::Serialize;
use serde_json::Value;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::error::MapError;
use crate::mapper::MapperOptions;

/// Renders a document as JSON text.
///
/// Pretty output indents every nesting level by `options.indent` spaces;
/// object keys keep their insertion order.
pub(crate) fn write(value: &Value, options: &MapperOptions) -> Result<String, MapError> {
    let mut out = Vec::with_capacity(128);
    if options.pretty {
        let indent = b" ".repeat(options.indent);
        let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut serializer)?;
    } else {
        let mut serializer = Serializer::with_formatter(&mut out, CompactFormatter);
        value.serialize(&mut serializer)?;
    }
    // serde_json only emits UTF-8.
    String::from_utf8(out).map_err(|error| MapError::conversion("writer", error))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::write;
    use crate::mapper::MapperOptions;

    #[test]
    fn one_space_per_level() {
        let value = json!({ "b": 1, "a": [true, { "c": null }] });
        let text = write(&value, &MapperOptions::default()).unwrap();
        assert_eq!(
            text,
            "{\n \"b\": 1,\n \"a\": [\n  true,\n  {\n   \"c\": null\n  }\n ]\n}"
        );
    }

    #[test]
    fn compact_and_wide() {
        let value = json!({ "k": [1] });
        let compact = MapperOptions { pretty: false, ..MapperOptions::default() };
        assert_eq!(write(&value, &compact).unwrap(), "{\"k\":[1]}");

        let wide = MapperOptions { indent: 4, ..MapperOptions::default() };
        assert_eq!(write(&value, &wide).unwrap(), "{\n    \"k\": [\n        1\n    ]\n}");
    }
}
