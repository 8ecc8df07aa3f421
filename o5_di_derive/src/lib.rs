use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Field, Fields};

/// Derive `o5_di::Build` for a struct by building every field from the
/// provider. Fields marked with `#[state]` are initialized using `Default`
/// instead. The built value is cached in the provider, so every dependent
/// shares the same instance.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let Data::Struct(data) = &input.data else {
        return syn::Error::new(input.span(), "Build can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let ident = &input.ident;
    let params = input
        .generics
        .type_params()
        .map(|param| &param.ident)
        .collect::<Vec<_>>();

    let bounds = data
        .fields
        .iter()
        .filter(|field| !is_state(field))
        .map(|Field { ty, .. }| quote! { #ty: ::o5_di::Build<__Provider> });

    let constructor = constructor(&data.fields);

    quote! {
        impl<__Provider, #(#params),*> ::o5_di::Build<__Provider> for #ident<#(#params),*>
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::o5_di::Provider,
            #(#bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) = ::o5_di::Provider::get(provider) {
                    return cached;
                }
                let built = #constructor;
                ::o5_di::Provider::insert(provider, ::core::clone::Clone::clone(&built));
                built
            }
        }
    }
    .into()
}

fn is_state(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("state"))
}

fn field_value(field: &Field) -> TokenStream2 {
    if is_state(field) {
        quote! { ::core::default::Default::default() }
    } else {
        quote! { ::o5_di::Build::build(provider) }
    }
}

fn constructor(fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let ident = &field.ident;
                let value = field_value(field);
                quote! { #ident: #value }
            });
            quote! { Self { #(#fields),* } }
        }
        Fields::Unnamed(fields) => {
            let values = fields.unnamed.iter().map(field_value);
            quote! { Self( #(#values),* ) }
        }
        Fields::Unit => quote! { Self },
    }
}
