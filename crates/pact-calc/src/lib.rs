//! A small calculation pipeline whose functions carry runtime-checked contracts.
//!
//! [`run`] passes its input to [`calculate`], which adds [`OFFSET`] through
//! [`helper`] and multiplies by [`FACTOR`], and then hands the result to
//! [`display`]. Every function states its contract with `#[spec]`; a violated
//! condition panics, and preconditions are checked before anything is printed.
//!
//! The [`checked`] module offers the same pipeline with violations reported as
//! [`checked::CalcError`] values instead.

use std::io::{self, Write};

use pact::spec;
use tracing::debug;

pub mod checked;
pub mod logging;

/// Input the binary passes to [`calculate`] when none is given.
pub const DEFAULT_INPUT: i32 = 10;

/// Added by [`helper`].
pub const OFFSET: i32 = 5;

/// Applied by [`calculate`] to the output of [`helper`].
pub const FACTOR: i32 = 2;

/// Returns `x + 5`.
///
/// The addition wraps, so an overflow is reported by the postcondition rather
/// than by the build profile's overflow check.
#[spec(
    ensures: *output > x,
)]
pub fn helper(x: i32) -> i32 {
    let result = x.wrapping_add(OFFSET);
    debug!(x, result, "helper");
    result
}

/// Returns `(x + 5) * 2` for strictly positive `x`.
#[spec(
    requires: x > 0,
    ensures: *output > x,
)]
pub fn calculate(x: i32) -> i32 {
    let temp = helper(x);
    let result = temp.wrapping_mul(FACTOR);
    debug!(x, temp, result, "calculate");
    result
}

/// The line [`display`] prints, without the trailing newline.
pub fn format_result(value: i32) -> String {
    format!("Result: {value}")
}

/// Writes `Result: <value>` and a newline to `out`.
///
/// Negative values are rejected before writing, so a violation never leaves
/// a line behind. Write errors are returned, not panicked on.
#[spec(
    requires: value >= 0,
)]
pub fn display_to<W: Write>(out: &mut W, value: i32) -> io::Result<()> {
    debug!(value, "display");
    writeln!(out, "{}", format_result(value))
}

/// [`display_to`] on a locked stdout.
pub fn display(value: i32) -> io::Result<()> {
    display_to(&mut io::stdout().lock(), value)
}

/// Runs the whole pipeline for `input`, writing the line to `out`, and
/// returns the displayed value.
#[spec(
    binds: result,
    ensures: result.as_ref().map_or(true, |value| *value > 0),
)]
pub fn run_to<W: Write>(out: &mut W, input: i32) -> io::Result<i32> {
    let result = calculate(input);
    display_to(out, result)?;
    Ok(result)
}

/// [`run_to`] on a locked stdout.
pub fn run(input: i32) -> io::Result<i32> {
    run_to(&mut io::stdout().lock(), input)
}
