//! Object system - per-object property storage
//!
//! Design: three disjoint sub-tables built together at allocation:
//! - integer keys, compared by value
//! - float keys, compared by decoded numeric value
//! - reference keys, compared by handle identity
//!
//! The same number used as an integer key and as a float key addresses two
//! different slots.

use std::collections::HashMap;

use crate::error::{BridgeError, BridgeResult};
use crate::reference::{ObjHandle, Reference};

/// Float key normalised to its numeric value
///
/// `0.0` and `-0.0` share a slot, as do all NaNs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        let canonical = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        Self(canonical.to_bits())
    }
}

/// A property key, already routed to its partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i32),
    Float(FloatKey),
    Ref(ObjHandle),
}

impl Key {
    /// Route a reference to its key partition (`Null` is not a key)
    pub fn from_reference(key: Reference) -> BridgeResult<Self> {
        match key {
            Reference::Null => Err(BridgeError::InvalidKey),
            Reference::Int(v) => Ok(Key::Int(v)),
            Reference::Float(v) => Ok(Key::Float(FloatKey::new(v))),
            Reference::Obj(handle) => Ok(Key::Ref(handle)),
        }
    }

    /// Partition name, for logging
    pub fn partition(&self) -> &'static str {
        match self {
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Ref(_) => "ref",
        }
    }
}

/// Heap object with its three property partitions
#[derive(Debug, Default, Clone)]
pub struct Object {
    ints: HashMap<i32, Reference>,
    floats: HashMap<FloatKey, Reference>,
    refs: HashMap<ObjHandle, Reference>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property; a miss yields `Reference::Null`
    pub fn get(&self, key: Key) -> Reference {
        let slot = match key {
            Key::Int(k) => self.ints.get(&k),
            Key::Float(k) => self.floats.get(&k),
            Key::Ref(k) => self.refs.get(&k),
        };
        slot.copied().unwrap_or(Reference::Null)
    }

    /// Write or overwrite a property
    pub fn set(&mut self, key: Key, value: Reference) {
        match key {
            Key::Int(k) => {
                self.ints.insert(k, value);
            }
            Key::Float(k) => {
                self.floats.insert(k, value);
            }
            Key::Ref(k) => {
                self.refs.insert(k, value);
            }
        }
    }

    /// Populated slots across all partitions
    pub fn len(&self) -> usize {
        self.ints.len() + self.floats.len() + self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
