//! Code generation for `#[derive(Reflect)]`.

// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod object_kind;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

use proc_macro2::TokenStream;
use quote::quote;
use syn::WhereClause;

use crate::derive_data::{ReflectData, ReflectDerive};

pub(crate) fn impl_reflect(derive: &ReflectDerive) -> TokenStream {
    let type_path = trait_type_path::impl_trait_type_path(derive);

    let (info, kind_impl, kind) = match &derive.data {
        ReflectData::Object(fields) => (
            object_kind::object_info(derive, fields),
            object_kind::impl_object(derive, fields),
            quote!(Object),
        ),
        ReflectData::Enum(variants) => (
            enum_kind::enum_info(derive, variants),
            enum_kind::impl_enum(derive, variants),
            quote!(Enum),
        ),
    };

    let typed = trait_typed::impl_trait_typed(derive, info);
    let reflect = trait_reflect::impl_trait_reflect(derive, kind);

    quote! {
        const _: () = {
            #type_path
            #typed
            #reflect
            #kind_impl
        };
    }
}

/// The where clause of the input, extended with `bounds` on every type parameter.
pub(crate) fn extend_where_clause(derive: &ReflectDerive, bounds: TokenStream) -> WhereClause {
    let generics = derive.parser.generics();
    let mut where_clause = generics
        .where_clause
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(where));

    for param in derive.parser.type_params() {
        let ident = &param.ident;
        where_clause.predicates.push(syn::parse_quote!(#ident: #bounds));
    }
    where_clause
}

/// `Reflect + Typed`, the bound of every type parameter in reflection impls.
pub(crate) fn reflect_bounds(derive: &ReflectDerive) -> TokenStream {
    let reflect_ = crate::path::reflect_(&derive.jm_reflect_path);
    let typed_ = crate::path::typed_(&derive.jm_reflect_path);
    quote!(#reflect_ + #typed_)
}
