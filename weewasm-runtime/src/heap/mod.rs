//! Object heap - arena of WeeWasm objects addressed by handle
//!
//! Design: objects live for the whole run. Handles are arena indices that are
//! never reused, so identity stays stable and distinct until the heap itself
//! is dropped at end of run.

use crate::error::{BridgeError, BridgeResult};
use crate::logging::{log_object_alloc, log_property_access};
use crate::objects::{Key, Object};
use crate::reference::{ObjHandle, Reference};


#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<Object>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, empty object
    pub fn new_object(&mut self) -> Reference {
        let handle = ObjHandle::from_index(self.objects.len());
        self.objects.push(Object::new());
        log_object_alloc(handle, self.objects.len());
        Reference::Obj(handle)
    }

    /// Read a property; a missing key yields `Reference::Null`
    pub fn get(&self, target: Reference, key: Reference) -> BridgeResult<Reference> {
        let obj = self.resolve(target)?;
        let key = Key::from_reference(key)?;
        let value = obj.get(key);
        log_property_access("get", key.partition(), !value.is_null());
        Ok(value)
    }

    /// Write or overwrite a property
    pub fn set(&mut self, target: Reference, key: Reference, value: Reference) -> BridgeResult<()> {
        let obj = self.resolve_mut(target)?;
        let key = Key::from_reference(key)?;
        obj.set(key, value);
        log_property_access("set", key.partition(), true);
        Ok(())
    }

    /// Number of objects allocated so far
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn resolve(&self, target: Reference) -> BridgeResult<&Object> {
        let handle = expect_object(target)?;
        self.objects.get(handle.index()).ok_or(BridgeError::NOT_AN_OBJECT)
    }

    fn resolve_mut(&mut self, target: Reference) -> BridgeResult<&mut Object> {
        let handle = expect_object(target)?;
        self.objects.get_mut(handle.index()).ok_or(BridgeError::NOT_AN_OBJECT)
    }
}

fn expect_object(target: Reference) -> BridgeResult<ObjHandle> {
    match target {
        Reference::Obj(handle) => Ok(handle),
        Reference::Null => Err(BridgeError::NULL_REFERENCE),
        Reference::Int(_) | Reference::Float(_) => Err(BridgeError::NOT_AN_OBJECT),
    }
}
