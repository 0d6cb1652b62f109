use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use jm_reflect::Reflect;
use jm_reflect::derive::Reflect;
use serde_json::{Value, json};

use crate::converters::{EnumConverter, NumberConverter};
use crate::{
    ConvertContext, Converter, Decoded, JsonMapper, JsonProperty, MapError, MapperOptions,
};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Reflect, Default, Debug, PartialEq, Clone, Copy)]
enum Color {
    #[default]
    Red,
    Blue,
    Green,
    Brown,
    Yellow,
    Black,
    White,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Address {
    street: String,
    zip: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Person {
    name: String,
    age: u8,
    home: Address,
    favorite: Color,
    nicknames: Vec<String>,
    scores: BTreeMap<String, Vec<i64>>,
    spouse: Option<String>,
}

fn person() -> Person {
    Person {
        name: "Ada".into(),
        age: 36,
        home: Address {
            street: "1 Loop Rd".into(),
            zip: 90210,
        },
        favorite: Color::Black,
        nicknames: vec!["countess".into()],
        scores: BTreeMap::from([("math".into(), vec![10, 9]), ("art".into(), vec![])]),
        spouse: None,
    }
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn round_trip_reproduces_the_text() {
    let mapper = JsonMapper::new();
    let text = mapper.serialize(&person()).unwrap();

    let back: Person = mapper.deserialize(&text).unwrap();
    assert_eq!(back, person());
    assert_eq!(mapper.serialize(&back).unwrap(), text);
}

#[test]
fn properties_keep_declaration_order() {
    let text = JsonMapper::new().serialize(&person()).unwrap();
    let keys = ["\"name\"", "\"age\"", "\"home\"", "\"favorite\"", "\"nicknames\"", "\"scores\"", "\"spouse\""];
    let positions: Vec<usize> = keys.iter().map(|key| text.find(key).unwrap()).collect();
    assert!(positions.is_sorted(), "{text}");
}

#[test]
fn pretty_output_indents_one_space() {
    let mapper = JsonMapper::new();
    let text = mapper
        .serialize(&Address {
            street: "x".into(),
            zip: 1,
        })
        .unwrap();
    assert_eq!(text, "{\n \"street\": \"x\",\n \"zip\": 1\n}");

    let value: BTreeMap<String, Address> = BTreeMap::from([("a".into(), Address::default())]);
    let text = mapper.serialize(&value).unwrap();
    assert_eq!(text, "{\n \"a\": {\n  \"street\": \"\",\n  \"zip\": 0\n }\n}");

    let compact = JsonMapper::with_options(MapperOptions {
        pretty: false,
        ..MapperOptions::default()
    });
    assert_eq!(compact.serialize(&value).unwrap(), r#"{"a":{"street":"","zip":0}}"#);
}

#[test]
fn unknown_keys_are_skipped() {
    let mapper = JsonMapper::new();
    let address: Address = mapper
        .from_value(&json!({ "street": "Elm", "floor": 3, "zip": 7 }))
        .unwrap();
    assert_eq!(address, Address { street: "Elm".into(), zip: 7 });
}

// -----------------------------------------------------------------------------
// Property metadata

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Account {
    #[reflect(@JsonProperty::new().name("login"))]
    user: String,
    #[reflect(@JsonProperty::new().ignore())]
    secret: String,
    #[reflect(@JsonProperty::new().converter(NumberConverter).param("format", "##.##"))]
    balance: f64,
}

#[test]
fn renamed_ignored_and_formatted() {
    let mapper = JsonMapper::new();
    let account = Account {
        user: "root".into(),
        secret: "hunter2".into(),
        balance: 1_200_000.246,
    };

    let json = mapper.to_value(&account).unwrap();
    assert_eq!(json, json!({ "login": "root", "balance": "1200000.25" }));

    // An ignored key in the input is not read either.
    let back: Account = mapper
        .from_value(&json!({ "login": "root", "secret": "leak", "balance": "1200000.25" }))
        .unwrap();
    assert_eq!(back.secret, "");
    assert_eq!(back.balance, 1_200_000.25);
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Palette {
    primary: Color,
    #[reflect(@JsonProperty::new().converter(EnumConverter::index()).enum_values::<Color>())]
    accent: Color,
    #[reflect(@JsonProperty::new().converter(EnumConverter::index()))]
    history: Vec<Color>,
}

#[test]
fn enum_encodings() {
    let mapper = JsonMapper::new();
    let palette = Palette {
        primary: Color::Black,
        accent: Color::Brown,
        history: vec![Color::White, Color::Red],
    };

    let json = mapper.to_value(&palette).unwrap();
    assert_eq!(json, json!({ "primary": "Color.Black", "accent": 3, "history": [6, 0] }));
    assert_eq!(mapper.from_value::<Palette>(&json).unwrap(), palette);
}

// -----------------------------------------------------------------------------
// Construction

#[derive(Reflect, Debug, PartialEq)]
#[reflect(constructor)]
struct Point {
    x: i32,
    y: i32,
    label: Option<String>,
}

#[derive(Reflect, Debug)]
struct Opaque {
    id: u32,
}

#[test]
fn immutable_types_use_their_constructor() {
    let mapper = JsonMapper::new();
    let point: Point = mapper.from_value(&json!({ "y": -2, "x": 5 })).unwrap();
    assert_eq!(point, Point { x: 5, y: -2, label: None });

    let text = mapper.serialize(&point).unwrap();
    assert_eq!(mapper.deserialize::<Point>(&text).unwrap(), point);
}

#[test]
fn types_without_a_constructor_are_unsupported() {
    let mapper = JsonMapper::new();
    assert_eq!(mapper.to_value(&Opaque { id: 1 }).unwrap(), json!({ "id": 1 }));

    let error = mapper.from_value::<Opaque>(&json!({ "id": 1 })).unwrap_err();
    assert!(matches!(error.root(), MapError::UnsupportedType { .. }));
}

// -----------------------------------------------------------------------------
// Cycles

#[derive(Reflect, Default)]
#[reflect(default)]
struct Parent {
    name: String,
    child: Option<Arc<RwLock<Child>>>,
}

#[derive(Reflect, Default)]
#[reflect(default)]
struct Child {
    name: String,
    parent: Option<Arc<RwLock<Parent>>>,
}

#[test]
fn direct_cycle_is_rejected() {
    let parent = Arc::new(RwLock::new(Parent::default()));
    let child = Arc::new(RwLock::new(Child {
        name: "kid".into(),
        parent: Some(parent.clone()),
    }));
    parent.write().unwrap().child = Some(child.clone());

    let error = JsonMapper::new().serialize(&parent).unwrap_err();
    assert!(matches!(error.root(), MapError::CircularReference { .. }));

    child.write().unwrap().parent = None;
    let json = JsonMapper::new().to_value(&parent).unwrap();
    assert_eq!(json, json!({ "name": "", "child": { "name": "kid", "parent": null } }));
}

#[test]
fn indirect_cycle_is_rejected() {
    let a = Arc::new(RwLock::new(Parent { name: "a".into(), child: None }));
    let b = Arc::new(RwLock::new(Child { name: "b".into(), parent: None }));
    let c = Arc::new(RwLock::new(Parent { name: "c".into(), child: Some(b.clone()) }));
    let d = Arc::new(RwLock::new(Child { name: "d".into(), parent: Some(c.clone()) }));
    a.write().unwrap().child = Some(d.clone());
    b.write().unwrap().parent = Some(a.clone());

    let error = JsonMapper::new().serialize(&a).unwrap_err();
    assert!(matches!(error.root(), MapError::CircularReference { .. }));
    #[cfg(feature = "debug")]
    assert_eq!(error.path(), Some("$.child.parent.child.parent"));

    b.write().unwrap().parent = None;
}

// -----------------------------------------------------------------------------
// Registration

struct Upper;

impl Converter for Upper {
    fn name(&self) -> &'static str {
        "upper"
    }

    fn to_json(&self, value: &dyn Reflect, _ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let text = value
            .downcast_ref::<String>()
            .ok_or_else(|| MapError::mismatch("String", value.reflect_type_info().type_path()))?;
        Ok(Value::String(text.to_uppercase()))
    }

    fn from_json(&self, json: &Value, _ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let text = json.as_str().ok_or_else(|| MapError::unexpected_json("a string", json))?;
        Ok(Decoded::Value(Box::new(text.to_lowercase())))
    }
}

#[test]
fn registered_converter_applies_everywhere() {
    let mapper = JsonMapper::new();
    let before = mapper.to_value(&person()).unwrap();
    assert_eq!(before["home"]["street"], "1 Loop Rd");

    mapper.register_converter::<String>(Upper);
    let after = mapper.to_value(&person()).unwrap();
    assert_eq!(after["name"], "ADA");
    assert_eq!(after["home"]["street"], "1 LOOP RD");
    assert_eq!(after["nicknames"], json!(["COUNTESS"]));
    // Keys go through the key converter too.
    assert!(after["scores"].get("MATH").is_some());

    let back: Person = mapper.from_value(&after).unwrap();
    assert_eq!(back.home.street, "1 loop rd");
    assert_eq!(back.favorite, Color::Black);
}

#[derive(Debug, Default, PartialEq)]
struct Celsius(f64);

jm_reflect::impl_reflect_scalar!(Celsius);

struct CelsiusConverter;

impl Converter for CelsiusConverter {
    fn name(&self) -> &'static str {
        "celsius"
    }

    fn to_json(&self, value: &dyn Reflect, ctx: &ConvertContext<'_>) -> Result<Value, MapError> {
        let Celsius(degrees) = value
            .downcast_ref::<Celsius>()
            .ok_or_else(|| ctx.failure("not a temperature"))?;
        Ok(Value::String(format!("{degrees}C")))
    }

    fn from_json(&self, json: &Value, ctx: &mut ConvertContext<'_>) -> Result<Decoded, MapError> {
        let degrees = json
            .as_str()
            .and_then(|text| text.strip_suffix('C'))
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| ctx.failure("not a temperature"))?;
        Ok(Decoded::Value(Box::new(Celsius(degrees))))
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Forecast {
    high: Celsius,
    low: Option<Celsius>,
}

#[test]
fn global_registration() {
    crate::register_converter::<Celsius>(CelsiusConverter);

    let forecast = Forecast {
        high: Celsius(21.5),
        low: Some(Celsius(-3.0)),
    };
    let text = crate::serialize(&forecast).unwrap();
    assert_eq!(text, "{\n \"high\": \"21.5C\",\n \"low\": \"-3C\"\n}");
    assert_eq!(crate::deserialize::<Forecast>(&text).unwrap(), forecast);
}

// -----------------------------------------------------------------------------
// Failures

#[test]
fn failures_name_the_property() {
    let mapper = JsonMapper::new();
    let error = mapper
        .from_value::<Person>(&json!({ "home": { "zip": true } }))
        .unwrap_err();
    assert!(matches!(error.root(), MapError::TypeMismatch { .. }));
    #[cfg(feature = "debug")]
    assert_eq!(error.path(), Some("$.home.zip"));

    // An unreadable number string leaves the default.
    let person: Person = mapper.from_value(&json!({ "home": { "zip": "north" } })).unwrap();
    assert_eq!(person.home.zip, 0);

    let error = mapper.deserialize::<Person>("{ not json").unwrap_err();
    assert!(matches!(error, MapError::Json(_)));
}
