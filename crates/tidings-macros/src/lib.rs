// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! This crate provides the derive macros re-exported by `tidings-core`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, DeriveInput, LitStr, Token, Type};

/// A derive macro that implements the `tidings_core::Event` trait.
///
/// ```rust,ignore
/// #[derive(Event)]
/// #[event(payload = String, name = "chat.message")]
/// struct Message;
/// ```
///
/// `payload` is required. `name` defaults to the type's identifier.
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_event(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// A derive macro that implements `tidings_core::EventMap`, declaring every
/// event listed in `#[events(...)]`.
///
/// ```rust,ignore
/// #[derive(EventMap)]
/// #[events(Joined, Left, Message)]
/// struct LobbyEvents;
/// ```
#[proc_macro_derive(EventMap, attributes(events))]
pub fn derive_event_map(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_event_map(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_event(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let mut payload: Option<Type> = None;
    let mut event_name: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("payload") {
                payload = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                event_name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported event attribute, expected `payload` or `name`"))
            }
        })?;
    }

    let Some(payload) = payload else {
        return Err(syn::Error::new_spanned(
            name,
            "missing `#[event(payload = Type)]` attribute",
        ));
    };
    let event_name = event_name.unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tidings_core::event::Event for #name #ty_generics #where_clause {
            type Payload = #payload;
            const NAME: &'static str = #event_name;
        }
    })
}

fn expand_event_map(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let mut events: Vec<Type> = Vec::new();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("events")) {
        let listed = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
        events.extend(listed);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let declarations = events.iter().map(|event| {
        quote! {
            impl #impl_generics ::tidings_core::event::Declares<#event, ::tidings_core::event::Here>
                for #name #ty_generics #where_clause {}
        }
    });

    Ok(quote! {
        impl #impl_generics ::tidings_core::event::EventMap for #name #ty_generics #where_clause {}
        #(#declarations)*
    })
}
