use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectDerive;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(derive: &ReflectDerive) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let type_path_ = crate::path::type_path_(jm_reflect_path);

    let real_ident = derive.parser.real_ident();
    let type_ident = derive.parser.type_ident();
    let mut type_path = derive.parser.type_path(jm_reflect_path);
    let mut type_name = derive.parser.type_name(jm_reflect_path);

    if derive.parser.impl_with_generic() {
        let cell_ = crate::path::generic_path_cell_(jm_reflect_path);
        let wrap = |generator: TokenStream| {
            quote! {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_insert::<Self>(|| #generator)
            }
        };
        type_path = wrap(type_path);
        type_name = wrap(type_name);
    }

    let (impl_generics, ty_generics, _) = derive.parser.generics().split_for_impl();
    let where_clause = super::extend_where_clause(derive, quote!(#type_path_));

    quote! {
        impl #impl_generics #type_path_ for #real_ident #ty_generics #where_clause {
            fn type_path() -> &'static str {
                #type_path
            }

            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }
        }
    }
}
