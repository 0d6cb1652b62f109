use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, LitStr, Path, TypeParam};

/// The names and generics of the derived type.
pub(crate) struct TypeParser<'a> {
    ident: &'a Ident,
    custom_path: Option<Path>,
    generics: &'a Generics,
}

impl<'a> TypeParser<'a> {
    pub fn new(ident: &'a Ident, custom_path: Option<Path>, generics: &'a Generics) -> Self {
        Self {
            ident,
            custom_path,
            generics,
        }
    }

    /// The ident used in `impl ... for #real_ident`.
    pub fn real_ident(&self) -> &'a Ident {
        self.ident
    }

    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    pub fn type_params(&self) -> impl Iterator<Item = &'a TypeParam> {
        self.generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(param) => Some(param),
            _ => None,
        })
    }

    /// Whether `TypePath`/`Typed` need a per-instantiation cell.
    pub fn impl_with_generic(&self) -> bool {
        self.type_params().next().is_some()
    }

    /// The bare ident, as a string literal.
    pub fn type_ident(&self) -> LitStr {
        let ident = match &self.custom_path {
            Some(path) => path
                .segments
                .last()
                .map_or_else(|| self.ident.clone(), |segment| segment.ident.clone()),
            None => self.ident.clone(),
        };
        LitStr::new(&ident.to_string(), ident.span())
    }

    /// The module path, as an expression evaluating to `&'static str`.
    fn module_path(&self) -> TokenStream {
        match &self.custom_path {
            Some(path) => {
                let module = path
                    .segments
                    .iter()
                    .take(path.segments.len().saturating_sub(1))
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                LitStr::new(&module, self.ident.span()).into_token_stream()
            }
            None => quote! { ::core::module_path!() },
        }
    }

    /// Expression of the full type path.
    ///
    /// A `&'static str` constant for non-generic types, a `String` otherwise.
    pub fn type_path(&self, jm_reflect_path: &Path) -> TokenStream {
        let module = self.module_path();
        let ident = self.type_ident();
        let is_root = matches!(&self.custom_path, Some(path) if path.segments.len() == 1);

        if !self.impl_with_generic() {
            return match &self.custom_path {
                Some(path) => {
                    let full = path
                        .segments
                        .iter()
                        .map(|segment| segment.ident.to_string())
                        .collect::<Vec<_>>()
                        .join("::");
                    LitStr::new(&full, self.ident.span()).into_token_stream()
                }
                None => quote! { ::core::concat!(module_path!(), "::", #ident) },
            };
        }

        let params = self.param_names(jm_reflect_path, quote!(type_path));
        let concat_ = crate::path::concat_(jm_reflect_path);
        if is_root {
            quote! { #concat_(&[#ident, "<", &#params, ">"]) }
        } else {
            quote! { #concat_(&[#module, "::", #ident, "<", &#params, ">"]) }
        }
    }

    /// Expression of the short type name, like [`type_path`](Self::type_path).
    pub fn type_name(&self, jm_reflect_path: &Path) -> TokenStream {
        let ident = self.type_ident();
        if !self.impl_with_generic() {
            return ident.into_token_stream();
        }

        let params = self.param_names(jm_reflect_path, quote!(type_name));
        let concat_ = crate::path::concat_(jm_reflect_path);
        quote! { #concat_(&[#ident, "<", &#params, ">"]) }
    }

    /// `[T::f(), U::f()].join(", ")`
    fn param_names(&self, jm_reflect_path: &Path, f: TokenStream) -> TokenStream {
        let type_path_ = crate::path::type_path_(jm_reflect_path);
        let params = self.type_params().map(|param| {
            let ident = &param.ident;
            quote! { <#ident as #type_path_>::#f() }
        });
        quote! { [#(#params),*].join(", ") }
    }
}
