//! Class declarations registered with the type universe.

use ruleprobe_core::{FieldDescriptor, FieldFlags, TypeDescriptor, TypeName, Value};

/// A declared field plus the value it starts with.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub descriptor: FieldDescriptor,
    /// Initial value; `None` means the zero value of the field's type.
    pub initial: Option<Value>,
}

/// A class declaration: name, supertypes and fields.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: TypeName,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub fields: Vec<FieldEntry>,
}

impl ClassEntry {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: impl Into<TypeName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<TypeName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a public instance field.
    pub fn field(self, name: &str, value_class: TypeDescriptor) -> Self {
        let descriptor = FieldDescriptor::instance(self.name.clone(), name, value_class);
        self.with_field(descriptor, None)
    }

    /// Add a public static field with an initial value.
    pub fn static_field(self, name: &str, value_class: TypeDescriptor, initial: Value) -> Self {
        let descriptor = FieldDescriptor::static_field(self.name.clone(), name, value_class);
        self.with_field(descriptor, Some(initial))
    }

    /// Add a field with explicit flags.
    ///
    /// The descriptor is re-homed onto this class.
    pub fn with_field(mut self, mut descriptor: FieldDescriptor, initial: Option<Value>) -> Self {
        descriptor.declaring_type = self.name.clone();
        self.fields.push(FieldEntry {
            descriptor,
            initial,
        });
        self
    }

    /// Mark the most recently added field with extra flags.
    pub fn flagged(mut self, flags: FieldFlags) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.descriptor.flags |= flags;
        }
        self
    }

    /// Supertypes in declaration order: superclass first, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeName> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|entry| entry.descriptor.name == name)
    }
}
