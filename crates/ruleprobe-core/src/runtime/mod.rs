//! Live object storage consulted by the interpreter.
//!
//! [`ObjectGraph`] is the reflective read/write capability. [`ObjectHeap`] is
//! the in-process implementation used by rule preparation tests and the
//! reference interpreter.

mod object_heap;

pub use object_heap::{HeapObject, ObjectHandle, ObjectHeap};

use crate::{AccessError, FieldDescriptor, Value};

/// Reflective access to fields of live objects and classes.
pub trait ObjectGraph {
    fn get_field(&self, owner: ObjectHandle, field: &FieldDescriptor)
    -> Result<Value, AccessError>;

    fn set_field(
        &mut self,
        owner: ObjectHandle,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), AccessError>;

    fn get_static(&self, field: &FieldDescriptor) -> Result<Value, AccessError>;

    fn set_static(&mut self, field: &FieldDescriptor, value: Value) -> Result<(), AccessError>;
}
