//! See [`Reflect`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Object` (for `struct T { ... }`)
/// - `Enum` (for field-less `enum T { ... }`)
///
/// Tuple structs, unit structs and enums with fields are rejected.
///
/// ## Construction
///
/// A struct tells the mapping engine how it can be built:
///
/// ```rust, ignore
/// // Built with `Default::default()`, then fields are assigned one by one.
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Mutable { a: i32 }
///
/// // Built once from all values, by field name.
/// // Missing values fall back to `Default::default()` of the field type.
/// #[derive(Reflect)]
/// #[reflect(constructor)]
/// struct Immutable { a: i32 }
/// ```
///
/// Both flags may be combined in one `#[reflect(default, constructor)]`.
/// A struct with neither can be written to JSON but not read back.
///
/// ## Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "model::Car")]
/// struct Car { /* ... */ }
/// ```
///
/// By default the path is `module_path!()` followed by the ident.
/// Generic parameters are appended automatically.
///
/// ## Custom Attributes
///
/// Any expression after `@` is stored in the field's `CustomAttributes`,
/// keyed by the expression's type:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Slider {
///     #[reflect(@0.5_f32)]
///     value: f32,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectDerive::from_input(&ast) {
        Ok(derive) => impls::impl_reflect(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
