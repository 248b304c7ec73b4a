#![doc = include_str!("../../../README.md")]

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{ItemFn, parse_macro_input};

use pact_core::Spec;

/// Attach runtime-checked preconditions and postconditions to a function.
///
/// ```ignore
/// #[spec(
///     requires: x > 0,
///     ensures: *output > x,
/// )]
/// fn calculate(x: i32) -> i32 { /* ... */ }
/// ```
///
/// Preconditions are asserted before the body, postconditions after it with
/// the return value bound by reference (`output`, or the pattern given by
/// `binds`). A failed condition panics.
#[proc_macro_attribute]
pub fn spec(args: TokenStream, input: TokenStream) -> TokenStream {
    let spec = parse_macro_input!(args as Spec);
    let func = parse_macro_input!(input as ItemFn);

    pact_core::expand(spec, func)
        .map(ToTokens::into_token_stream)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
