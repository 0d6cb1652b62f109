use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectDerive;

/// Generate implementation codes for `Reflect`.
pub(crate) fn impl_trait_reflect(derive: &ReflectDerive, kind: TokenStream) -> TokenStream {
    let jm_reflect_path = &derive.jm_reflect_path;
    let reflect_ = crate::path::reflect_(jm_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(jm_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jm_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(jm_reflect_path);
    let box_ = crate::path::box_(jm_reflect_path);

    let real_ident = derive.parser.real_ident();
    let (impl_generics, ty_generics, _) = derive.parser.generics().split_for_impl();
    let where_clause = super::extend_where_clause(derive, super::reflect_bounds(derive));

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }
        }
    }
}
