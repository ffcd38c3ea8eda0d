//! WeeWasm Runtime - references and objects for compiled WeeWasm modules
//!
//! The execution substrate has no object type of its own. This crate
//! supplies the tagged reference model the bridge exchanges with compiled
//! code and the heap of property objects those references point at.

pub mod error;
pub mod heap;
pub mod logging;
pub mod numeric;
pub mod objects;
pub mod reference;

// Re-export core types
pub use error::{BridgeError, BridgeResult};
pub use heap::Heap;
pub use objects::{FloatKey, Key, Object};
pub use reference::{box_f64, box_i32, ref_eq, unbox_f64, unbox_i32, ObjHandle, Reference};
