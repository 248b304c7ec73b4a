use proc_macro2::Span;
use syn::{
    Expr, Pat, Token,
    parse::{Parse, ParseStream, Result},
    parse_quote,
};

use crate::Spec;

mod kw {
    syn::custom_keyword!(requires);
    syn::custom_keyword!(binds);
    syn::custom_keyword!(ensures);
}

/// Clauses in the only order an attribute may list them.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum Clause {
    Requires,
    Binds,
    Ensures,
}

impl Clause {
    fn parse(input: ParseStream) -> Result<(Self, Span)> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::requires) {
            Ok((Clause::Requires, input.parse::<kw::requires>()?.span))
        } else if lookahead.peek(kw::binds) {
            Ok((Clause::Binds, input.parse::<kw::binds>()?.span))
        } else if lookahead.peek(kw::ensures) {
            Ok((Clause::Ensures, input.parse::<kw::ensures>()?.span))
        } else {
            Err(lookahead.error())
        }
    }
}

/// `requires: <cond>, binds: <pat>, ensures: <cond>`, every clause optional,
/// `requires` and `ensures` repeatable or given a `[..]` list.
impl Parse for Spec {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut spec = Spec {
            requires: Vec::new(),
            binds: parse_quote!(output),
            ensures: Vec::new(),
        };
        let mut has_binds = false;
        let mut previous: Option<Clause> = None;

        while !input.is_empty() {
            let (clause, span) = Clause::parse(input)?;
            if previous.is_some_and(|previous| clause < previous) {
                return Err(syn::Error::new(
                    span,
                    "clauses must appear in the order `requires`, `binds`, `ensures`",
                ));
            }
            previous = Some(clause);
            input.parse::<Token![:]>()?;

            match clause {
                Clause::Requires => spec.requires.extend(conditions(input.parse()?)?),
                Clause::Binds => {
                    if has_binds {
                        return Err(syn::Error::new(span, "`binds` may appear only once"));
                    }
                    has_binds = true;
                    spec.binds = Pat::parse_single(input)?;
                }
                Clause::Ensures => spec.ensures.extend(conditions(input.parse()?)?),
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(spec)
    }
}

/// Split `[a, b]` into its conditions. A condition is a plain `bool`
/// expression; closures are rejected since `binds` names the return value.
fn conditions(expr: Expr) -> Result<Vec<Expr>> {
    let exprs = match expr {
        Expr::Array(list) => list.elems.into_iter().collect(),
        expr => vec![expr],
    };
    for expr in &exprs {
        if let Expr::Closure(closure) = expr {
            return Err(syn::Error::new_spanned(
                closure,
                "a condition must be a `bool` expression; use `binds` to name the return value",
            ));
        }
    }
    Ok(exprs)
}
