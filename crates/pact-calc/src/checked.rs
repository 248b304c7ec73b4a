//! The calculation pipeline with contract violations returned as errors.
//!
//! Each function validates its inputs before doing any work and uses checked
//! arithmetic, so a failure leaves no output behind and never panics.

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::{FACTOR, OFFSET, format_result};

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{function}: precondition `{condition}` failed for {value}")]
    Precondition {
        function: &'static str,
        condition: &'static str,
        value: i32,
    },

    #[error("{function}: arithmetic overflow on {operand}")]
    Overflow {
        function: &'static str,
        operand: i32,
    },

    #[error("failed to write result: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Returns `x + 5`, or [`CalcError::Overflow`].
pub fn helper(x: i32) -> Result<i32> {
    let result = x.checked_add(OFFSET).ok_or(CalcError::Overflow {
        function: "helper",
        operand: x,
    })?;
    debug!(x, result, "helper");
    Ok(result)
}

/// Returns `(x + 5) * 2`; `x` must be strictly positive.
pub fn calculate(x: i32) -> Result<i32> {
    if x <= 0 {
        return Err(CalcError::Precondition {
            function: "calculate",
            condition: "x > 0",
            value: x,
        });
    }

    let temp = helper(x)?;
    let result = temp.checked_mul(FACTOR).ok_or(CalcError::Overflow {
        function: "calculate",
        operand: temp,
    })?;
    debug!(x, temp, result, "calculate");
    Ok(result)
}

/// Writes `Result: <value>\n` to `out`; `value` must be non-negative.
pub fn display<W: Write>(out: &mut W, value: i32) -> Result<()> {
    if value < 0 {
        return Err(CalcError::Precondition {
            function: "display",
            condition: "value >= 0",
            value,
        });
    }

    writeln!(out, "{}", format_result(value))?;
    Ok(())
}

/// Runs the whole pipeline for `input`, writing the result line to `out`.
pub fn run<W: Write>(out: &mut W, input: i32) -> Result<i32> {
    let result = calculate(input)?;
    display(out, result)?;
    Ok(result)
}
