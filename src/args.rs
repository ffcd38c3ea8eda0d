//! Argument adapter - command-line strings to entry-point parameters
//!
//! A trailing float suffix (`d` by default) selects a float argument, anything
//! else is an integer. Values are then coerced to the declared parameter
//! types of the entry export.

use wasmtime::{Val, ValType};
use weewasm_runtime::numeric::{parse_number, to_int32};
use weewasm_runtime::{box_f64, box_i32, Reference};

use crate::error::HarnessError;
use crate::imports::to_extern;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument {
    Int(i32),
    Float(f64),
}

impl Argument {
    /// Parse one argument with the given float suffix
    pub fn parse(text: &str, float_suffix: &str) -> Self {
        match text.strip_suffix(float_suffix) {
            Some(number) if !float_suffix.is_empty() => Argument::Float(parse_number(number)),
            _ => Argument::Int(to_int32(parse_number(text))),
        }
    }

    /// Parse every argument in order
    pub fn parse_all<S: AsRef<str>>(texts: &[S], float_suffix: &str) -> Vec<Self> {
        texts
            .iter()
            .map(|t| Self::parse(t.as_ref(), float_suffix))
            .collect()
    }

    /// Coerce to a parameter of type `ty`
    pub fn to_val(self, ty: &ValType) -> Option<Val> {
        let val = match (self, ty) {
            (Argument::Int(v), ValType::I32) => Val::I32(v),
            (Argument::Float(v), ValType::I32) => Val::I32(to_int32(v)),
            (Argument::Int(v), ValType::F64) => Val::F64((v as f64).to_bits()),
            (Argument::Float(v), ValType::F64) => Val::F64(v.to_bits()),
            (Argument::Int(v), ValType::ExternRef) => Val::ExternRef(to_extern(box_i32(v))),
            (Argument::Float(v), ValType::ExternRef) => Val::ExternRef(to_extern(box_f64(v))),
            _ => return None,
        };
        Some(val)
    }
}

/// Value a parameter takes when no argument was supplied for it
pub fn missing_val(ty: &ValType) -> Option<Val> {
    match ty {
        ValType::I32 => Some(Val::I32(0)),
        ValType::F64 => Some(Val::F64(f64::NAN.to_bits())),
        ValType::ExternRef => Some(Val::ExternRef(to_extern(Reference::Null))),
        _ => None,
    }
}

/// Build the parameter list for an entry point
///
/// Surplus arguments are ignored; missing ones take `missing_val`.
pub fn coerce<I>(entry: &str, params: I, args: &[Argument]) -> Result<Vec<Val>, HarnessError>
where
    I: IntoIterator<Item = ValType>,
{
    params
        .into_iter()
        .enumerate()
        .map(|(i, ty)| {
            let val = match args.get(i) {
                Some(arg) => arg.to_val(&ty),
                None => missing_val(&ty),
            };
            val.ok_or_else(|| HarnessError::UnsupportedParam {
                entry: entry.to_string(),
                position: format!("parameter {}", i),
                ty: ty.to_string(),
            })
        })
        .collect()
}
