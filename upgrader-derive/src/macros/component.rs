//! The `#[component]` attribute macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitBool, LitStr, Token, parse2};

/// Parsed attributes for #[component].
struct ComponentAttrs {
    name: Option<String>,
    selector: Option<String>,
    widget: bool,
}

impl ComponentAttrs {
    fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut name: Option<String> = None;
        let mut selector: Option<String> = None;
        let mut widget = true;

        if !attr.is_empty() {
            let parser = syn::meta::parser(|meta| {
                if meta.path.is_ident("name") {
                    meta.input.parse::<Token![=]>()?;
                    let lit: LitStr = meta.input.parse()?;
                    name = Some(lit.value());
                } else if meta.path.is_ident("selector") {
                    meta.input.parse::<Token![=]>()?;
                    let lit: LitStr = meta.input.parse()?;
                    selector = Some(lit.value());
                } else if meta.path.is_ident("widget") {
                    if meta.input.peek(Token![=]) {
                        meta.input.parse::<Token![=]>()?;
                        let lit: LitBool = meta.input.parse()?;
                        widget = lit.value;
                    }
                } else {
                    return Err(meta.error("unknown component attribute"));
                }
                Ok(())
            });
            syn::parse::Parser::parse2(parser, attr)?;
        }

        Ok(Self {
            name,
            selector,
            widget,
        })
    }
}

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match ComponentAttrs::parse(attr) {
        Ok(a) => a,
        Err(e) => return e.to_compile_error(),
    };
    let input: DeriveInput = match parse2(item) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[component] cannot be used on generic types",
        )
        .to_compile_error();
    }

    let ident = &input.ident;
    let name = attrs.name.unwrap_or_else(|| ident.to_string());
    let selector = match attrs.selector {
        Some(selector) => quote! { ::core::option::Option::Some(#selector) },
        None => quote! { ::core::option::Option::None },
    };
    let widget = attrs.widget;

    quote! {
        #input

        ::upgrader::inventory::submit! {
            ::upgrader::ComponentRegistration::new(
                #name,
                #selector,
                #widget,
                ::upgrader::construct::<#ident>,
            )
        }
    }
}
