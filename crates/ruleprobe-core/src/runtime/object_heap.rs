//! Generational arena of class instances plus static field storage.

use rustc_hash::FxHashMap;
use std::fmt;

use super::ObjectGraph;
use crate::{
    AccessError, FieldDescriptor, FieldFlags, ObjectType, Type, TypeHash, TypeName, Value,
};

/// Handle to an object in an [`ObjectHeap`].
///
/// The generation detects handles that outlive the object they named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    pub index: u32,
    pub generation: u32,
}

impl ObjectHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Storage for one declared field.
#[derive(Debug, Clone)]
struct FieldSlot {
    declaring_type: TypeName,
    name: String,
    ty: Type,
    flags: FieldFlags,
    value: Value,
}

impl FieldSlot {
    fn matches(&self, field: &FieldDescriptor) -> bool {
        self.name == field.name && self.declaring_type == field.declaring_type
    }
}

/// A class instance: its runtime class and its field values.
#[derive(Debug, Clone)]
pub struct HeapObject {
    class: ObjectType,
    fields: Vec<FieldSlot>,
}

impl HeapObject {
    pub fn class(&self) -> &ObjectType {
        &self.class
    }

    /// Current value of the first field called `name`, regardless of which
    /// class declared it.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.value)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn slot(&self, field: &FieldDescriptor) -> Option<&FieldSlot> {
        self.fields.iter().find(|slot| slot.matches(field))
    }

    fn slot_mut(&mut self, field: &FieldDescriptor) -> Option<&mut FieldSlot> {
        self.fields.iter_mut().find(|slot| slot.matches(field))
    }
}

struct HeapSlot {
    generation: u32,
    object: Option<HeapObject>,
}

/// Heap storage for class instances with generational indices.
///
/// Freed slots are reused with an incremented generation, so a stale
/// handle is reported instead of aliasing a newer object.
pub struct ObjectHeap {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
    statics: FxHashMap<TypeHash, Vec<FieldSlot>>,
}

impl ObjectHeap {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            statics: FxHashMap::default(),
        }
    }

    /// Allocate an instance of `class` with no fields defined yet.
    pub fn allocate(&mut self, class: ObjectType) -> ObjectHandle {
        let object = HeapObject {
            class,
            fields: Vec::new(),
        };

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            ObjectHandle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                object: Some(object),
            });
            ObjectHandle::new(index, 0)
        }
    }

    /// Free an object. Later use of `handle` reports a stale handle.
    pub fn free(&mut self, handle: ObjectHandle) {
        if let Some(slot) = self.slots.get_mut(handle.index as usize) {
            if slot.generation == handle.generation && slot.object.is_some() {
                slot.object = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(handle.index);
            }
        }
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&HeapObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_ref()
    }

    fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut HeapObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn class_of(&self, handle: ObjectHandle) -> Option<&ObjectType> {
        self.get(handle).map(HeapObject::class)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Define (or redefine) an instance field, bypassing the final check.
    pub fn define_field(
        &mut self,
        owner: ObjectHandle,
        field: &FieldDescriptor,
        ty: Type,
        initial: Value,
    ) -> Result<(), AccessError> {
        let value = self.coerce(field, &ty, initial)?;
        let object = self
            .get_mut(owner)
            .ok_or(AccessError::StaleHandle { index: owner.index })?;
        let slot = new_slot(field, ty, value);
        match object.slot_mut(field) {
            Some(existing) => *existing = slot,
            None => object.fields.push(slot),
        }
        Ok(())
    }

    /// Define (or redefine) a static field, bypassing the final check.
    pub fn define_static(
        &mut self,
        field: &FieldDescriptor,
        ty: Type,
        initial: Value,
    ) -> Result<(), AccessError> {
        let value = self.coerce(field, &ty, initial)?;
        let slots = self
            .statics
            .entry(TypeHash::of(&field.declaring_type))
            .or_default();
        let slot = new_slot(field, ty, value);
        match slots.iter_mut().find(|existing| existing.matches(field)) {
            Some(existing) => *existing = slot,
            None => slots.push(slot),
        }
        Ok(())
    }

    /// Convert `value` for storage in a field of type `ty`.
    fn coerce(
        &self,
        field: &FieldDescriptor,
        ty: &Type,
        value: Value,
    ) -> Result<Value, AccessError> {
        let stored = match (ty.dereference(), value) {
            (Type::Primitive(kind), _) => value.widen_to(*kind),
            (Type::Object(_) | Type::Undefined, Value::Null) => Some(Value::Null),
            (Type::Object(expected), Value::Object(handle)) => self
                .class_of(handle)
                .filter(|class| expected.is_assignable_from(class))
                .map(|_| value),
            (Type::Undefined, Value::Object(handle)) => self.class_of(handle).map(|_| value),
            _ => None,
        };
        stored.ok_or_else(|| AccessError::InvalidArgument {
            field: field.to_string(),
            expected: ty.to_string(),
            found: self.describe(value),
        })
    }

    fn describe(&self, value: Value) -> String {
        match value {
            Value::Object(handle) => match self.class_of(handle) {
                Some(class) => class.name.to_string(),
                None => "freed object".to_string(),
            },
            other => other.type_label().to_string(),
        }
    }

    fn static_slot(&self, field: &FieldDescriptor) -> Result<&FieldSlot, AccessError> {
        self.statics
            .get(&TypeHash::of(&field.declaring_type))
            .and_then(|slots| slots.iter().find(|slot| slot.matches(field)))
            .ok_or_else(|| no_such_field(field))
    }
}

fn new_slot(field: &FieldDescriptor, ty: Type, value: Value) -> FieldSlot {
    FieldSlot {
        declaring_type: field.declaring_type.clone(),
        name: field.name.clone(),
        ty,
        flags: field.flags,
        value,
    }
}

fn no_such_field(field: &FieldDescriptor) -> AccessError {
    AccessError::NoSuchField {
        type_name: field.declaring_type.to_string(),
        field: field.name.clone(),
    }
}

fn check_writable(slot: &FieldSlot, field: &FieldDescriptor) -> Result<(), AccessError> {
    if slot.flags.contains(FieldFlags::FINAL) {
        return Err(AccessError::Denied {
            field: field.to_string(),
            reason: "field is final".to_string(),
        });
    }
    Ok(())
}

impl ObjectGraph for ObjectHeap {
    fn get_field(
        &self,
        owner: ObjectHandle,
        field: &FieldDescriptor,
    ) -> Result<Value, AccessError> {
        let object = self
            .get(owner)
            .ok_or(AccessError::StaleHandle { index: owner.index })?;
        object
            .slot(field)
            .map(|slot| slot.value)
            .ok_or_else(|| no_such_field(field))
    }

    fn set_field(
        &mut self,
        owner: ObjectHandle,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), AccessError> {
        let object = self
            .get(owner)
            .ok_or(AccessError::StaleHandle { index: owner.index })?;
        let slot = object.slot(field).ok_or_else(|| no_such_field(field))?;
        check_writable(slot, field)?;
        let ty = slot.ty.clone();
        let value = self.coerce(field, &ty, value)?;

        if let Some(slot) = self.get_mut(owner).and_then(|object| object.slot_mut(field)) {
            slot.value = value;
        }
        Ok(())
    }

    fn get_static(&self, field: &FieldDescriptor) -> Result<Value, AccessError> {
        self.static_slot(field).map(|slot| slot.value)
    }

    fn set_static(&mut self, field: &FieldDescriptor, value: Value) -> Result<(), AccessError> {
        let slot = self.static_slot(field)?;
        check_writable(slot, field)?;
        let ty = slot.ty.clone();
        let value = self.coerce(field, &ty, value)?;

        if let Some(slot) = self
            .statics
            .get_mut(&TypeHash::of(&field.declaring_type))
            .and_then(|slots| slots.iter_mut().find(|slot| slot.matches(field)))
        {
            slot.value = value;
        }
        Ok(())
    }
}

impl Default for ObjectHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("slot_count", &self.slots.len())
            .field("free_count", &self.free_list.len())
            .field("static_types", &self.statics.len())
            .finish()
    }
}
