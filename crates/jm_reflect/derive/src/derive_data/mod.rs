//! Parsed form of a `#[derive(Reflect)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod type_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use type_parser::TypeParser;

use syn::{Data, DeriveInput, Fields, Ident, Type, spanned::Spanned};

/// A named field of a struct.
pub(crate) struct ObjectField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// The reflected shape of the input.
pub(crate) enum ReflectData<'a> {
    Object(Vec<ObjectField<'a>>),
    Enum(Vec<&'a Ident>),
}

/// Everything the code generators need.
pub(crate) struct ReflectDerive<'a> {
    pub attrs: TypeAttributes,
    pub parser: TypeParser<'a>,
    pub data: ReflectData<'a>,
    pub jm_reflect_path: syn::Path,
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let data = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    let mut parsed = Vec::with_capacity(fields.named.len());
                    for field in &fields.named {
                        parsed.push(ObjectField {
                            ident: field.ident.as_ref().ok_or_else(|| {
                                syn::Error::new(field.span(), "expected a named field")
                            })?,
                            ty: &field.ty,
                            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                        });
                    }
                    ReflectData::Object(parsed)
                }
                _ => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Reflect` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                if attrs.default || attrs.constructor {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`default` and `constructor` only apply to structs",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.span(),
                            "`Reflect` can only be derived for enums without fields",
                        ));
                    }
                    variants.push(&variant.ident);
                }
                ReflectData::Enum(variants)
            }
            Data::Union(_) => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "`Reflect` cannot be derived for unions",
                ));
            }
        };

        let parser = TypeParser::new(&input.ident, attrs.type_path.clone(), &input.generics);

        Ok(Self {
            attrs,
            parser,
            data,
            jm_reflect_path: crate::path::jm_reflect(),
        })
    }
}
