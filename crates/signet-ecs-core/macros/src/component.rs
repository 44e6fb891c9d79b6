use proc_macro::TokenStream;
use syn::{parse_macro_input, parse_quote, DeriveInput};
use quote::quote;

///
/// Implements the marker trait through the facade path
/// `signet_ecs::core::Component`, so user crates only depend on `signet-ecs`.
///
pub fn derive_component(input: TokenStream) -> TokenStream {
    let mut ast = parse_macro_input!(input as DeriveInput);

    // components are stored behind `dyn Any`
    for param in ast.generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }

    let name = &ast.ident;
    let (ty_impl, ty_gen, where_clause) = ast.generics.split_for_impl();

    TokenStream::from(quote! {
        impl #ty_impl signet_ecs::core::Component for #name #ty_gen #where_clause {
        }
    })
}
