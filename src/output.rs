//! Result printer - renders the entry point's return values
//!
//! i32 results print as decimal integers, f64 results in the host number
//! format, references through their `Display`. Fixed-point mode renders every
//! numeric result with a fixed count of fractional digits.

use std::fmt;

use weewasm_runtime::numeric::{format_fixed, format_number};
use weewasm_runtime::Reference;

/// A value returned by the entry point
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Ref(Reference),
    /// A value the bridge has no rendering for (funcref, v128)
    Opaque(&'static str),
}

impl ResultValue {
    /// Host number format for numbers, `Display` for references
    pub fn render(&self) -> String {
        match self {
            ResultValue::I32(v) => v.to_string(),
            ResultValue::I64(v) => v.to_string(),
            ResultValue::F32(v) => format_number(*v as f64),
            ResultValue::F64(v) => format_number(*v),
            ResultValue::Ref(r) => r.to_string(),
            ResultValue::Opaque(name) => format!("[{}]", name),
        }
    }

    /// Fixed-point form with `precision` fractional digits
    ///
    /// Integer references are plain numbers to the host and format like
    /// `I32`. Boxed floats, objects and null have no fixed-point form; the
    /// error is the description of the resulting trap.
    pub fn render_fixed(&self, precision: usize) -> Result<String, String> {
        match self {
            ResultValue::I32(v) | ResultValue::Ref(Reference::Int(v)) => {
                Ok(format_fixed(*v as f64, precision))
            }
            ResultValue::I64(v) => Ok(format_fixed(*v as f64, precision)),
            ResultValue::F32(v) => Ok(format_fixed(*v as f64, precision)),
            ResultValue::F64(v) => Ok(format_fixed(*v, precision)),
            ResultValue::Ref(r) => Err(format!("{} result has no fixed-point form", r.kind())),
            ResultValue::Opaque(name) => Err(format!("{} result has no fixed-point form", name)),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render the full result line (without the trailing newline)
///
/// Fails only in fixed-point mode, with the trap description.
pub fn format_results(values: &[ResultValue], fixed: Option<usize>) -> Result<String, String> {
    if values.is_empty() {
        return Ok("undefined".to_string());
    }

    let rendered = values
        .iter()
        .map(|v| match fixed {
            Some(precision) => v.render_fixed(precision),
            None => Ok(v.render()),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(" "))
}
