use proc_macro2::TokenStream;
use quote::quote;
use syn::{Index, LitStr};

use crate::derive_data::{ObjectField, ReflectDerive};

/// Expression of `TypeInfo::Object(ObjectInfo::new::<Self>(..)...)`.
pub(crate) fn object_info(derive: &ReflectDerive, fields: &[ObjectField]) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let type_info_ = crate::path::type_info_(jm_reflect_path);
    let object_info_ = crate::path::object_info_(jm_reflect_path);
    let field_info_ = crate::path::field_info_(jm_reflect_path);
    let reflect_ = crate::path::reflect_(jm_reflect_path);
    let box_ = crate::path::box_(jm_reflect_path);

    let field_infos = fields.iter().map(|field| {
        let ty = field.ty;
        let name = LitStr::new(&field.ident.to_string(), field.ident.span());
        let attributes = field.attrs.get_expression_with(jm_reflect_path);
        quote! {
            #field_info_::new::<#ty>(#name) #attributes
        }
    });

    let with_generics = super::trait_typed::with_generics(derive);

    let with_default = if derive.attrs.default {
        quote! {
            .with_default(|| -> #box_<dyn #reflect_> {
                #box_::new(<Self as ::core::default::Default>::default())
            })
        }
    } else {
        TokenStream::new()
    };

    let with_constructor = if derive.attrs.constructor {
        constructor(derive, fields)
    } else {
        TokenStream::new()
    };

    quote! {
        #type_info_::Object(
            #object_info_::new::<Self>(&[#(#field_infos),*])
                #with_generics
                #with_default
                #with_constructor
        )
    }
}

/// `.with_constructor(Constructor::new(&[..], |args| ..))`
fn constructor(derive: &ReflectDerive, fields: &[ObjectField]) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let constructor_ = crate::path::constructor_(jm_reflect_path);
    let named_args_ = crate::path::named_args_(jm_reflect_path);
    let construct_error_ = crate::path::construct_error_(jm_reflect_path);
    let reflect_ = crate::path::reflect_(jm_reflect_path);
    let box_ = crate::path::box_(jm_reflect_path);

    let names: Vec<LitStr> = fields
        .iter()
        .map(|field| LitStr::new(&field.ident.to_string(), field.ident.span()))
        .collect();

    let inits = fields.iter().zip(&names).map(|(field, name)| {
        let ident = field.ident;
        let ty = field.ty;
        quote! { #ident: args.take_or_default::<#ty>(#name)? }
    });

    quote! {
        .with_constructor(#constructor_::new(
            &[#(#names),*],
            |mut args: #named_args_| -> ::core::result::Result<#box_<dyn #reflect_>, #construct_error_> {
                ::core::result::Result::Ok(#box_::new(Self { #(#inits,)* }))
            },
        ))
    }
}

/// Generate implementation codes for `Object`.
pub(crate) fn impl_object(derive: &ReflectDerive, fields: &[ObjectField]) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let object_ = crate::path::object_(jm_reflect_path);
    let reflect_ = crate::path::reflect_(jm_reflect_path);

    let indices: Vec<Index> = (0..fields.len()).map(Index::from).collect();
    let idents: Vec<_> = fields.iter().map(|field| field.ident).collect();
    let field_len = fields.len();

    let real_ident = derive.parser.real_ident();
    let (impl_generics, ty_generics, _) = derive.parser.generics().split_for_impl();
    let where_clause = super::extend_where_clause(derive, super::reflect_bounds(derive));

    quote! {
        impl #impl_generics #object_ for #real_ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
