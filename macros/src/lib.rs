//! Derive macros for the Hooks Lab framework
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates wire-kind helpers for action enums
//!
//! # Example
//!
//! ```ignore
//! use hooks_lab_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     AddTodo { name: String },
//!     ToggleTodo { id: u64 },
//!
//!     #[unrecognized]
//!     Unrecognized { kind: String },
//! }
//!
//! assert_eq!(TodoAction::AddTodo { name: "milk".into() }.kind(), "add-todo");
//! assert_eq!(TodoAction::KINDS, &["add-todo", "toggle-todo"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `kind()` - The wire tag of the variant, the variant name in kebab-case
/// - `is_recognized()` - False only for the `#[unrecognized]` variant
/// - `KINDS` - Every recognized wire tag, in declaration order
///
/// # Attributes
///
/// - `#[unrecognized]` - Marks the catch-all variant for unknown tags. It
///   must have a named `kind: String` field; `kind()` returns that field.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - More than one variant is marked `#[unrecognized]`
/// - The `#[unrecognized]` variant has no named `kind` field
#[proc_macro_derive(Action, attributes(unrecognized))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut catch_all: Option<&Variant> = None;
    let mut recognized = Vec::new();

    for variant in &data_enum.variants {
        if has_attribute(&variant.attrs, "unrecognized") {
            if catch_all.is_some() {
                return syn::Error::new_spanned(
                    variant,
                    "Only one variant can be marked #[unrecognized]",
                )
                .to_compile_error()
                .into();
            }
            if !has_named_field(&variant.fields, "kind") {
                return syn::Error::new_spanned(
                    variant,
                    "The #[unrecognized] variant needs a named `kind: String` field",
                )
                .to_compile_error()
                .into();
            }
            catch_all = Some(variant);
        } else {
            recognized.push(variant);
        }
    }

    let kinds: Vec<String> = recognized
        .iter()
        .map(|variant| kebab_case(&variant.ident.to_string()))
        .collect();

    let kind_arms = recognized.iter().zip(&kinds).map(|(variant, kind)| {
        let pattern = variant_pattern(variant);
        quote! { #pattern => #kind, }
    });

    let (catch_all_kind_arm, catch_all_recognized_arm) = catch_all.map_or_else(
        || (quote! {}, quote! {}),
        |variant| {
            let ident = &variant.ident;
            (
                quote! { Self::#ident { kind, .. } => kind.as_str(), },
                quote! { Self::#ident { .. } => false, },
            )
        },
    );

    let expanded = quote! {
        impl #name {
            /// Every recognized wire tag, in declaration order
            pub const KINDS: &'static [&'static str] = &[#(#kinds),*];

            /// Wire tag of this action
            #[must_use]
            pub fn kind(&self) -> &str {
                match self {
                    #(#kind_arms)*
                    #catch_all_kind_arm
                }
            }

            /// Returns false for actions carrying a tag nobody handles
            #[must_use]
            #[allow(clippy::match_like_matches_macro)]
            pub const fn is_recognized(&self) -> bool {
                match self {
                    #catch_all_recognized_arm
                    _ => true,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_named_field(fields: &Fields, name: &str) -> bool {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| ident == name)),
        Fields::Unnamed(_) | Fields::Unit => false,
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// `AddTodo` -> `add-todo`
fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.char_indices() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
