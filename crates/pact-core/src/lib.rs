//! Parsing and expansion for the `#[spec]` contract attribute.
//!
//! A [`Spec`] holds the conditions of one attribute; [`expand`] rewrites the
//! annotated function so that each of them is asserted at runtime.

use syn::{Expr, Pat};

mod expand;
mod parse;

pub use expand::expand;

/// The contract of one function.
#[derive(Debug)]
pub struct Spec {
    /// Asserted on entry, in order, before the body has any effect.
    pub requires: Vec<Expr>,
    /// Bound to a reference to the return value while `ensures` runs.
    /// `output` unless the attribute says otherwise.
    pub binds: Pat,
    /// Asserted on exit, in order.
    pub ensures: Vec<Expr>,
}
