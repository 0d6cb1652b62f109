use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, LitStr};

use crate::derive_data::ReflectDerive;

/// Expression of `TypeInfo::Enum(EnumInfo::new::<Self>(..))`.
pub(crate) fn enum_info(derive: &ReflectDerive, variants: &[&Ident]) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let type_info_ = crate::path::type_info_(jm_reflect_path);
    let enum_info_ = crate::path::enum_info_(jm_reflect_path);
    let reflect_ = crate::path::reflect_(jm_reflect_path);
    let box_ = crate::path::box_(jm_reflect_path);

    let names = variant_names(variants);
    let indices = 0..variants.len();
    let with_generics = super::trait_typed::with_generics(derive);

    quote! {
        #type_info_::Enum(
            #enum_info_::new::<Self>(
                &[#(#names),*],
                |index: usize| -> ::core::option::Option<#box_<dyn #reflect_>> {
                    match index {
                        #(#indices => ::core::option::Option::Some(#box_::new(Self::#variants)),)*
                        _ => ::core::option::Option::None,
                    }
                },
            )
            #with_generics
        )
    }
}

/// Generate implementation codes for `Enum`.
pub(crate) fn impl_enum(derive: &ReflectDerive, variants: &[&Ident]) -> TokenStream {
    let enum_ = crate::path::enum_(&derive.jm_reflect_path);

    let names = variant_names(variants);
    let indices = 0..variants.len();

    let real_ident = derive.parser.real_ident();
    let (impl_generics, ty_generics, _) = derive.parser.generics().split_for_impl();
    let where_clause = super::extend_where_clause(derive, super::reflect_bounds(derive));

    if variants.is_empty() {
        return quote! {
            impl #impl_generics #enum_ for #real_ident #ty_generics #where_clause {
                fn variant_name(&self) -> &'static str {
                    match *self {}
                }

                fn variant_index(&self) -> usize {
                    match *self {}
                }
            }
        };
    }

    quote! {
        impl #impl_generics #enum_ for #real_ident #ty_generics #where_clause {
            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#variants => #indices,)*
                }
            }
        }
    }
}

fn variant_names(variants: &[&Ident]) -> Vec<LitStr> {
    variants
        .iter()
        .map(|variant| LitStr::new(&variant.to_string(), variant.span()))
        .collect()
}
