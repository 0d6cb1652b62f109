//! Token paths into `jm_reflect`, kept in one place so the generated code
//! follows the crate layout.

use proc_macro2::TokenStream;
use quote::quote;

/// The path of the reflection crate.
///
/// `jm_reflect` declares `extern crate self as jm_reflect`, so the same
/// absolute path works inside and outside of it.
pub(crate) fn jm_reflect() -> syn::Path {
    syn::parse_quote!(::jm_reflect)
}

macro_rules! define_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(jm_reflect_path: &syn::Path) -> TokenStream {
                quote! { #jm_reflect_path $(::$segment)+ }
            }
        )*
    };
}

define_paths! {
    reflect_ => Reflect;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    object_info_ => info::ObjectInfo;
    enum_info_ => info::EnumInfo;
    field_info_ => info::FieldInfo;
    constructor_ => info::Constructor;
    custom_attributes_ => info::CustomAttributes;
    generics_ => info::Generics;
    type_param_info_ => info::TypeParamInfo;
    reflect_kind_ => info::ReflectKind;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    object_ => ops::Object;
    enum_ => ops::Enum;
    named_args_ => ops::NamedArgs;
    construct_error_ => ops::ConstructError;
    non_generic_cell_ => impls::NonGenericTypeInfoCell;
    generic_cell_ => impls::GenericTypeInfoCell;
    generic_path_cell_ => impls::GenericTypePathCell;
    concat_ => impls::concat;
    box_ => __macro_exports::Box;
}
