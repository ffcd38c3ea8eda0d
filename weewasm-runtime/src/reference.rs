//! Reference model - the tagged values exchanged with compiled WeeWasm code
//!
//! The substrate only has integers, floats and opaque references, so every
//! value a program hands to the bridge is one of four tags:
//! - `Int`: an unboxed i32, carried as is
//! - `Float`: a boxed f64, kept apart from `Int` even for equal numbers
//! - `Obj`: a handle into the heap, compared by identity
//! - `Null`: the absent value, returned by lookups that miss

use std::fmt;

use crate::error::{BridgeError, BridgeResult};
use crate::numeric::format_number;

/// Opaque identity of a heap object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjHandle(usize);

impl ObjHandle {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A tagged WeeWasm reference
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reference {
    #[default]
    Null,
    Int(i32),
    Float(f64),
    Obj(ObjHandle),
}

impl Reference {
    #[inline]
    pub fn is_null(self) -> bool {
        matches!(self, Reference::Null)
    }

    /// Tag name, for diagnostics
    pub fn kind(self) -> &'static str {
        match self {
            Reference::Null => "null",
            Reference::Int(_) => "i32",
            Reference::Float(_) => "f64",
            Reference::Obj(_) => "object",
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Null => write!(f, "null"),
            Reference::Int(v) => write!(f, "{}", v),
            Reference::Float(v) => write!(f, "{}", format_number(*v)),
            Reference::Obj(handle) => write!(f, "object#{}", handle.0),
        }
    }
}

/// Wrap an integer (no allocation)
#[inline]
pub fn box_i32(v: i32) -> Reference {
    Reference::Int(v)
}

/// Box a float so its tag survives the trip through a reference slot
#[inline]
pub fn box_f64(v: f64) -> Reference {
    Reference::Float(v)
}

pub fn unbox_i32(r: Reference) -> BridgeResult<i32> {
    match r {
        Reference::Int(v) => Ok(v),
        _ => Err(BridgeError::NOT_AN_I32),
    }
}

pub fn unbox_f64(r: Reference) -> BridgeResult<f64> {
    match r {
        Reference::Float(v) => Ok(v),
        _ => Err(BridgeError::NOT_AN_F64),
    }
}

/// Reference equality
///
/// A float operand only ever equals another float of the same numeric value;
/// that check runs first so a float never reaches the identity comparison.
/// Everything else compares by primitive value or by handle.
pub fn ref_eq(a: Reference, b: Reference) -> bool {
    match (a, b) {
        (Reference::Float(x), Reference::Float(y)) => x == y,
        (Reference::Float(_), _) | (_, Reference::Float(_)) => false,
        (Reference::Int(x), Reference::Int(y)) => x == y,
        (Reference::Obj(x), Reference::Obj(y)) => x == y,
        (Reference::Null, Reference::Null) => true,
        _ => false,
    }
}
