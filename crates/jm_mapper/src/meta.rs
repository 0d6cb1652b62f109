use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use jm_reflect::Reflect;
use jm_reflect::info::{EnumInfo, FieldInfo, TypeInfo, Typed};
use serde_json::{Map, Value};

use crate::converter::{Capabilities, Converter};
use crate::error::MapError;

// -----------------------------------------------------------------------------
// JsonProperty

/// Mapping configuration of one property, attached as a custom attribute.
///
/// ```
/// use jm_reflect::derive::Reflect;
/// use jm_mapper::JsonProperty;
/// use jm_mapper::converters::NumberConverter;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Invoice {
///     #[reflect(@JsonProperty::new().name("total").converter(NumberConverter).param("format", "#,##0.00"))]
///     amount: f64,
///     #[reflect(@JsonProperty::new().ignore())]
///     cache: Vec<u8>,
/// }
/// ```
#[derive(Clone, Default)]
pub struct JsonProperty {
    name: Option<&'static str>,
    ignore: bool,
    converter: Option<Arc<dyn Converter>>,
    params: ConverterParams,
    enum_values: Option<fn() -> &'static TypeInfo>,
}

impl JsonProperty {
    /// Creates a configuration that changes nothing.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wire name.
    #[inline]
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Excludes the property from both directions.
    #[inline]
    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Sets an explicit converter.
    #[inline]
    pub fn converter(mut self, converter: impl Converter) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Adds a converter parameter.
    #[inline]
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params = self.params.with(key, value);
        self
    }

    /// Declares the member list of an enum property.
    #[inline]
    pub fn enum_values<E: Typed>(mut self) -> Self {
        self.enum_values = Some(E::type_info);
        self
    }
}

impl fmt::Debug for JsonProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonProperty")
            .field("name", &self.name)
            .field("ignore", &self.ignore)
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .field("params", &self.params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConverterParams

/// String-keyed converter parameters, such as `format`.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ConverterParams(Arc<Map<String, Value>>);

impl ConverterParams {
    /// The key of the pattern parameter read by the date and number converters.
    pub const FORMAT: &'static str = "format";

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `key` set to `value`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.0).insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[inline]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The `format` pattern, if given.
    #[inline]
    pub fn format(&self) -> Option<&str> {
        self.get_str(Self::FORMAT)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// EnumMembers

/// The ordered member list of an enum type.
#[derive(Clone, Copy)]
pub struct EnumMembers {
    type_name: &'static str,
    info: &'static EnumInfo,
}

impl EnumMembers {
    /// Returns the members of `info`, or `None` if it is not an enum.
    pub fn of(info: &'static TypeInfo) -> Option<Self> {
        Some(Self {
            type_name: info.type_name(),
            info: info.as_enum()?,
        })
    }

    /// The short name of the enum type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn names(&self) -> &'static [&'static str] {
        self.info.variant_names()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.info.variant_len()
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.info.index_of(name)
    }

    /// Returns `"Type.Member"` of the member at `index`.
    pub fn full_name(&self, index: usize) -> Option<String> {
        let name = self.names().get(index)?;
        Some(alloc::format!("{}.{name}", self.type_name))
    }

    /// Creates the member at `index`.
    #[inline]
    pub fn variant(&self, index: usize) -> Option<Box<dyn Reflect>> {
        self.info.variant(index)
    }
}

impl fmt::Debug for EnumMembers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumMembers")
            .field(&self.type_name)
            .field(&self.names())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PropertyMeta

/// The resolved, immutable metadata of one property.
#[derive(Clone)]
pub struct PropertyMeta {
    declared: &'static str,
    wire: &'static str,
    ignored: bool,
    converter: Option<Arc<dyn Converter>>,
    params: ConverterParams,
    enum_members: Option<EnumMembers>,
}

impl PropertyMeta {
    /// The metadata of a top-level value.
    pub fn root() -> Self {
        Self::named("$")
    }

    /// Metadata of a property without any configuration.
    pub fn named(name: &'static str) -> Self {
        Self {
            declared: name,
            wire: name,
            ignored: false,
            converter: None,
            params: ConverterParams::new(),
            enum_members: None,
        }
    }

    /// Resolves the metadata of a declared field from its [`JsonProperty`].
    pub fn from_field(field: &FieldInfo) -> Result<Self, MapError> {
        let Some(property) = field.get_attribute::<JsonProperty>() else {
            return Ok(Self::named(field.name()));
        };

        let enum_members = match property.enum_values {
            Some(type_info) => {
                let info = type_info();
                Some(EnumMembers::of(info).ok_or_else(|| {
                    MapError::unsupported(info.type_path(), "`enum_values` expects an enum")
                })?)
            }
            None => None,
        };

        Ok(Self {
            declared: field.name(),
            wire: property.name.unwrap_or(field.name()),
            ignored: property.ignore,
            converter: property.converter.clone(),
            params: property.params.clone(),
            enum_members,
        })
    }

    /// Metadata for the elements of this property's container.
    ///
    /// Elements keep the parameters, the enum members and a non-composite
    /// explicit converter.
    pub fn element(&self) -> Self {
        Self {
            declared: self.declared,
            wire: self.wire,
            ignored: false,
            converter: self
                .converter
                .clone()
                .filter(|converter| !converter.capabilities().contains(Capabilities::COMPOSITE)),
            params: self.params.clone(),
            enum_members: self.enum_members,
        }
    }

    #[inline]
    pub fn declared_name(&self) -> &'static str {
        self.declared
    }

    #[inline]
    pub fn wire_name(&self) -> &'static str {
        self.wire
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    #[inline]
    pub fn converter(&self) -> Option<&Arc<dyn Converter>> {
        self.converter.as_ref()
    }

    #[inline]
    pub fn params(&self) -> &ConverterParams {
        &self.params
    }

    #[inline]
    pub fn enum_members(&self) -> Option<EnumMembers> {
        self.enum_members
    }
}

impl fmt::Debug for PropertyMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMeta")
            .field("declared", &self.declared)
            .field("wire", &self.wire)
            .field("ignored", &self.ignored)
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .field("params", &self.params)
            .field("enum_members", &self.enum_members)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use jm_reflect::derive::Reflect;
    use jm_reflect::info::Typed;

    use super::{JsonProperty, PropertyMeta};
    use crate::converters::{EnumConverter, IterableConverter};

    #[derive(Reflect, Debug, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    #[derive(Reflect)]
    struct Panel {
        #[reflect(@JsonProperty::new().name("tone").enum_values::<Shade>().param("format", "x"))]
        shade: Shade,
        #[reflect(@JsonProperty::new().converter(EnumConverter::index()))]
        history: Vec<Shade>,
        #[reflect(@JsonProperty::new().converter(IterableConverter).ignore())]
        scratch: Vec<u8>,
        plain: u8,
    }

    fn meta(name: &str) -> PropertyMeta {
        let info = Panel::type_info().as_object().unwrap();
        PropertyMeta::from_field(info.field(name).unwrap()).unwrap()
    }

    #[test]
    fn reads_json_property() {
        let shade = meta("shade");
        assert_eq!(shade.declared_name(), "shade");
        assert_eq!(shade.wire_name(), "tone");
        assert_eq!(shade.params().format(), Some("x"));

        let members = shade.enum_members().unwrap();
        assert_eq!(members.type_name(), "Shade");
        assert_eq!(members.full_name(1).as_deref(), Some("Shade.Dark"));
        assert_eq!(members.variant(0).unwrap().take::<Shade>().ok(), Some(Shade::Light));

        let plain = meta("plain");
        assert_eq!(plain.wire_name(), "plain");
        assert!(plain.converter().is_none());
        assert!(meta("scratch").is_ignored());
    }

    #[test]
    fn elements_inherit_leaf_converters_only() {
        let history = meta("history").element();
        assert_eq!(history.converter().map(|c| c.name()), Some("enum-index"));

        let scratch = meta("scratch").element();
        assert!(scratch.converter().is_none());
        assert!(!scratch.is_ignored());
    }
}
