//! Parsing of `#[reflect(...)]` attributes.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, LitStr, Path, Token, meta::ParseNestedMeta};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the type.
///
/// - `#[reflect(default)]`
/// - `#[reflect(constructor)]`
/// - `#[reflect(type_path = "module::Name")]`
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: bool,
    pub constructor: bool,
    pub type_path: Option<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            self.default = true;
            Ok(())
        } else if meta.path.is_ident("constructor") {
            self.constructor = true;
            Ok(())
        } else if meta.path.is_ident("type_path") {
            let lit: LitStr = meta.value()?.parse()?;
            let path = lit.parse_with(Path::parse_mod_style)?;
            if path.leading_colon.is_some() || path.segments.is_empty() {
                return Err(meta.error("expected a path like `module::Name`"));
            }
            self.type_path = Some(path);
            Ok(())
        } else {
            Err(meta.error("unknown type attribute, expected `default`, `constructor` or `type_path`"))
        }
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a field: `#[reflect(@expr)]`, repeatable.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    custom_attributes: Vec<Expr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_args_with(|input: syn::parse::ParseStream| {
                input.parse::<Token![@]>()?;
                this.custom_attributes.push(input.parse()?);
                Ok(())
            })?;
        }
        Ok(this)
    }

    /// Returns `.with_custom_attributes(...)`, or nothing if there are none.
    pub fn get_expression_with(&self, jm_reflect_path: &Path) -> TokenStream {
        if self.custom_attributes.is_empty() {
            return TokenStream::new();
        }

        let custom_attributes_ = crate::path::custom_attributes_(jm_reflect_path);
        let values = &self.custom_attributes;

        quote! {
            .with_custom_attributes(
                #custom_attributes_::new()
                    #(.with_attribute(#values))*
            )
        }
    }
}
