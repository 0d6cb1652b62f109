//! The built-in converter library.
//!
//! Leaf converters ([`NumberConverter`], [`DateConverter`], [`EnumConverter`],
//! [`Base64Converter`], [`BigIntConverter`], [`SymbolConverter`],
//! [`UriConverter`], [`RegexConverter`]) encode one value each. Composite
//! converters ([`MapConverter`], [`IterableConverter`],
//! [`OptionalConverter`], [`SharedConverter`]) convert their elements through
//! the engine, and [`PassThroughConverter`] hands user objects back to the
//! walker.

// -----------------------------------------------------------------------------
// Modules

mod bigint;
mod buffer;
mod date;
mod enums;
mod iterable;
mod map;
mod number;
mod optional;
mod passthrough;
mod pattern;
mod shared;
mod symbol;
mod uri;

// -----------------------------------------------------------------------------
// Exports

pub use bigint::BigIntConverter;
pub use buffer::Base64Converter;
pub use date::DateConverter;
pub use enums::{EnumConverter, EnumEncoding};
pub use iterable::IterableConverter;
pub use map::MapConverter;
pub use number::{NumberConverter, NumberPattern};
pub use optional::OptionalConverter;
pub use passthrough::PassThroughConverter;
pub use pattern::RegexConverter;
pub use shared::SharedConverter;
pub use symbol::{Symbol, SymbolConverter};
pub use uri::UriConverter;

use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::LazyLock;

use jm_reflect::descriptor::TypeDescriptor;
use jm_reflect::info::ReflectKind;
use jm_utils::TypeIdMap;

use crate::converter::{ConvertContext, Converter};
use crate::error::MapError;
use crate::registry::Resolved;

// -----------------------------------------------------------------------------
// Defaults

static PASS_THROUGH: LazyLock<Arc<dyn Converter>> = LazyLock::new(|| Arc::new(PassThroughConverter));
static ENUM_FULL_NAME: LazyLock<Arc<dyn Converter>> =
    LazyLock::new(|| Arc::new(EnumConverter::full_name()));
static MAP: LazyLock<Arc<dyn Converter>> = LazyLock::new(|| Arc::new(MapConverter));
static ITERABLE: LazyLock<Arc<dyn Converter>> = LazyLock::new(|| Arc::new(IterableConverter));
static OPTIONAL: LazyLock<Arc<dyn Converter>> = LazyLock::new(|| Arc::new(OptionalConverter));
static SHARED: LazyLock<Arc<dyn Converter>> = LazyLock::new(|| Arc::new(SharedConverter));

/// Built-in converters of concrete leaf types.
static BUILTINS: LazyLock<TypeIdMap<Arc<dyn Converter>>> = LazyLock::new(|| {
    let mut table: TypeIdMap<Arc<dyn Converter>> = TypeIdMap::new();

    let numbers: Arc<dyn Converter> = Arc::new(NumberConverter);
    for type_id in number::NUMBER_TYPES {
        table.insert(type_id(), numbers.clone());
    }

    let big: Arc<dyn Converter> = Arc::new(BigIntConverter);
    table.insert(TypeId::of::<i128>(), big.clone());
    table.insert(TypeId::of::<u128>(), big.clone());
    table.insert(TypeId::of::<rust_decimal::Decimal>(), big);

    let dates: Arc<dyn Converter> = Arc::new(DateConverter);
    table.insert(TypeId::of::<chrono::NaiveDateTime>(), dates.clone());
    table.insert(TypeId::of::<chrono::NaiveDate>(), dates.clone());
    table.insert(TypeId::of::<chrono::DateTime<chrono::Utc>>(), dates);

    table.insert(TypeId::of::<bytes::Bytes>(), Arc::new(Base64Converter));
    table.insert(TypeId::of::<http::Uri>(), Arc::new(UriConverter));
    table.insert(TypeId::of::<regex::Regex>(), Arc::new(RegexConverter));
    table.insert(TypeId::of::<Symbol>(), Arc::new(SymbolConverter));
    table
});

/// The default enum converter, full-name encoding.
#[inline]
pub(crate) fn enum_default() -> Arc<dyn Converter> {
    ENUM_FULL_NAME.clone()
}

/// The converter of last resort.
#[inline]
pub(crate) fn pass_through() -> Arc<dyn Converter> {
    PASS_THROUGH.clone()
}

/// A built-in converter for the bare type of `descriptor`.
pub(crate) fn builtin(descriptor: &TypeDescriptor) -> Option<Arc<dyn Converter>> {
    if let Some(found) = BUILTINS.get(&descriptor.id()) {
        return Some(found.clone());
    }
    match descriptor.kind() {
        ReflectKind::Optional => Some(OPTIONAL.clone()),
        ReflectKind::Shared => Some(SHARED.clone()),
        _ => None,
    }
}

/// The default converter of a container type.
pub(crate) fn container_default(descriptor: &TypeDescriptor) -> Option<Arc<dyn Converter>> {
    match descriptor.kind() {
        ReflectKind::Map => Some(MAP.clone()),
        ReflectKind::List | ReflectKind::Set => Some(ITERABLE.clone()),
        _ => None,
    }
}

/// Resolves the element converter of the `index`-th type parameter of the
/// composite value being converted.
pub(super) fn resolve_param(ctx: &ConvertContext<'_>, index: usize) -> Result<Resolved, MapError> {
    let descriptor = ctx.descriptor()?;
    let param = descriptor
        .param(index)
        .ok_or_else(|| MapError::unsupported(descriptor.path(), "missing type parameter"))?;
    Ok(ctx.composite()?.resolve(&ctx.meta().element(), param))
}
