//! Logging utilities for the WeeWasm runtime
//!
//! Lightweight event helpers for heap and bridge activity. Uses `tracing`
//! for structured logging; subscriber setup belongs to the embedding host.

// Re-export tracing macros for use throughout the runtime
pub use tracing::{debug, error, info, trace, warn, Level};

use crate::error::BridgeError;
use crate::reference::ObjHandle;

/// Log an object allocation
#[inline]
pub fn log_object_alloc(handle: ObjHandle, live_objects: usize) {
    trace!(
        target: "heap",
        handle = handle.index(),
        live_objects,
        "allocated object"
    );
}

/// Log a property read or write
#[inline]
pub fn log_property_access(op: &'static str, partition: &'static str, hit: bool) {
    trace!(
        target: "heap",
        op,
        partition,
        hit,
        "property access"
    );
}

/// Log a bridge call from compiled code
#[inline]
pub fn log_bridge_call(name: &str) {
    trace!(
        target: "bridge",
        function = name,
        "bridge call"
    );
}

/// Log a bridge failure that is about to become a trap
#[inline]
pub fn log_bridge_error(name: &str, error: &BridgeError) {
    debug!(
        target: "bridge",
        function = name,
        kind = error.kind(),
        %error,
        "bridge call failed"
    );
}
