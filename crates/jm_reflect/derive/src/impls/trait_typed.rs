use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectDerive;

/// Generate implementation codes for `Typed`.
///
/// `info` is the expression building the kind-specific info, e.g. `ObjectInfo::new::<Self>(..)`.
pub(crate) fn impl_trait_typed(derive: &ReflectDerive, info: TokenStream) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let typed_ = crate::path::typed_(jm_reflect_path);
    let type_info_ = crate::path::type_info_(jm_reflect_path);

    let body = if derive.parser.impl_with_generic() {
        let cell_ = crate::path::generic_cell_(jm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #info)
        }
    } else {
        let cell_ = crate::path::non_generic_cell_(jm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #info)
        }
    };

    let real_ident = derive.parser.real_ident();
    let (impl_generics, ty_generics, _) = derive.parser.generics().split_for_impl();
    let where_clause = super::extend_where_clause(derive, super::reflect_bounds(derive));

    quote! {
        impl #impl_generics #typed_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #body
            }
        }
    }
}

/// `.with_generics(Generics::from_params(&[TypeParamInfo::new::<T>("T"), ..]))`,
/// or nothing for non-generic types.
pub(crate) fn with_generics(derive: &ReflectDerive) -> TokenStream {
    if !derive.parser.impl_with_generic() {
        return TokenStream::new();
    }

    let generics_ = crate::path::generics_(&derive.jm_reflect_path);
    let type_param_info_ = crate::path::type_param_info_(&derive.jm_reflect_path);
    let params = derive.parser.type_params().map(|param| {
        let ident = &param.ident;
        let name = ident.to_string();
        quote! { #type_param_info_::new::<#ident>(#name) }
    });

    quote! {
        .with_generics(#generics_::from_params(&[#(#params),*]))
    }
}
