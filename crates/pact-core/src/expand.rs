use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Block, Expr, Ident, ItemFn, ReturnType, parse_quote};

use crate::Spec;

/// Rewrite `func` so that `spec.requires` is asserted before its body runs and
/// `spec.ensures` after it returns; a failed condition panics.
pub fn expand(spec: Spec, mut func: ItemFn) -> syn::Result<ItemFn> {
    if let Some(token) = func.sig.asyncness {
        return Err(syn::Error::new_spanned(
            token,
            "#[spec] does not support async functions",
        ));
    }
    if let Some(token) = func.sig.constness {
        return Err(syn::Error::new_spanned(
            token,
            "#[spec] does not support const functions",
        ));
    }

    let return_type = match &func.sig.output {
        ReturnType::Default => quote!(()),
        ReturnType::Type(_, ty) => ty.to_token_stream(),
    };
    // Mixed-site, so neither the body nor a condition can name it.
    let output = Ident::new("__pact_output", Span::mixed_site());
    let body = &func.block;

    let entry_checks = spec
        .requires
        .iter()
        .map(|condition| assertion(condition, "Precondition"));
    let exit_checks = exit_checks(&spec, &output);

    // The closure turns a `return` in the body into the output value, so the
    // exit checks still run.
    let block: Block = parse_quote! {
        {
            #(#entry_checks)*
            let #output: #return_type = (|| #body)();
            #exit_checks
            #output
        }
    };
    *func.block = block;

    Ok(func)
}

fn exit_checks(spec: &Spec, output: &Ident) -> TokenStream {
    if spec.ensures.is_empty() {
        return TokenStream::new();
    }

    let binds = &spec.binds;
    let checks = spec
        .ensures
        .iter()
        .map(|condition| assertion(condition, "Postcondition"));
    quote! {
        {
            #[allow(unused_variables)]
            let #binds = &#output;
            #(#checks)*
        }
    }
}

/// The message carries the condition's source text. It is passed as an
/// argument so braces in the condition are not read as format placeholders.
fn assertion(condition: &Expr, kind: &str) -> TokenStream {
    let message = format!("{kind} failed: {}", condition.to_token_stream());
    quote! { assert!(#condition, "{}", #message); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn calculate() -> ItemFn {
        parse_quote! {
            pub fn calculate(x: i32) -> i32 {
                helper(x) * 2
            }
        }
    }

    fn assert_block(func: &ItemFn, expected: Block) {
        assert_eq!(
            func.block.to_token_stream().to_string(),
            expected.to_token_stream().to_string()
        );
    }

    #[test]
    fn preconditions_precede_body() {
        let spec: Spec = parse_quote! { requires: [FIRST, SECOND] };
        let func = expand(spec, calculate()).unwrap();

        assert_block(
            &func,
            parse_quote! {
                {
                    assert!(FIRST, "{}", "Precondition failed: FIRST");
                    assert!(SECOND, "{}", "Precondition failed: SECOND");
                    let __pact_output: i32 = (|| {
                        helper(x) * 2
                    })();
                    __pact_output
                }
            },
        );
    }

    #[test]
    fn postconditions_see_output_by_reference() {
        let spec: Spec = parse_quote! {
            requires: ENTRY,
            ensures: EXIT,
        };
        let func = expand(spec, calculate()).unwrap();

        assert_block(
            &func,
            parse_quote! {
                {
                    assert!(ENTRY, "{}", "Precondition failed: ENTRY");
                    let __pact_output: i32 = (|| {
                        helper(x) * 2
                    })();
                    {
                        #[allow(unused_variables)]
                        let output = &__pact_output;
                        assert!(EXIT, "{}", "Postcondition failed: EXIT");
                    }
                    __pact_output
                }
            },
        );
    }

    #[test]
    fn binds_pattern_replaces_output() {
        let spec: Spec = parse_quote! {
            binds: (quotient, remainder),
            ensures: REMAINDER_SMALL,
        };
        let func = expand(spec, calculate()).unwrap();

        assert_block(
            &func,
            parse_quote! {
                {
                    let __pact_output: i32 = (|| {
                        helper(x) * 2
                    })();
                    {
                        #[allow(unused_variables)]
                        let (quotient, remainder) = &__pact_output;
                        assert!(REMAINDER_SMALL, "{}", "Postcondition failed: REMAINDER_SMALL");
                    }
                    __pact_output
                }
            },
        );
    }

    #[test]
    fn unit_functions_bind_unit_output() {
        let spec: Spec = parse_quote! { requires: NON_NEGATIVE };
        let func: ItemFn = parse_quote! {
            fn display(value: i32) {
                show(value);
            }
        };
        let func = expand(spec, func).unwrap();

        assert_block(
            &func,
            parse_quote! {
                {
                    assert!(NON_NEGATIVE, "{}", "Precondition failed: NON_NEGATIVE");
                    let __pact_output: () = (|| {
                        show(value);
                    })();
                    __pact_output
                }
            },
        );
    }

    #[test]
    fn signature_and_attributes_are_kept() {
        let spec: Spec = parse_quote! { requires: x > 0 };
        let func: ItemFn = parse_quote! {
            /// Doubles.
            #[inline]
            pub(crate) fn double(x: i32) -> i32 {
                x * 2
            }
        };
        let before = func.sig.to_token_stream().to_string();
        let func = expand(spec, func).unwrap();

        assert_eq!(func.sig.to_token_stream().to_string(), before);
        assert_eq!(func.attrs.len(), 2);
    }

    #[test]
    fn message_keeps_condition_text() {
        let condition: Expr = parse_quote!(value >= 0);
        let check = assertion(&condition, "Precondition").to_string();

        assert!(check.contains("\"Precondition failed: value >= 0\""), "{check}");
    }

    #[test]
    fn async_functions_are_rejected() {
        let func: ItemFn = parse_quote! {
            async fn fetch(x: i32) -> i32 { x }
        };
        let err = expand(parse_quote! { requires: x > 0 }, func).unwrap_err();

        assert_eq!(err.to_string(), "#[spec] does not support async functions");
    }

    #[test]
    fn const_functions_are_rejected() {
        let func: ItemFn = parse_quote! {
            const fn double(x: i32) -> i32 { x * 2 }
        };
        let err = expand(parse_quote! { requires: x > 0 }, func).unwrap_err();

        assert_eq!(err.to_string(), "#[spec] does not support const functions");
    }
}
