//! The type registry: every class a rule may name.

use log::debug;
use rustc_hash::FxHashMap;
use ruleprobe_core::{
    FieldDescriptor, ObjectHandle, ObjectHeap, ObjectType, RegistrationError, Type,
    TypeDescriptor, TypeName, TypeUniverse, Value,
};

use crate::class::ClassEntry;
use crate::hierarchy::ClassHierarchy;

/// How unqualified type names are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Packages searched, in order, for a name that is not fully qualified.
    pub default_packages: Vec<String>,
    /// Whether a simple name owned by exactly one registered class matches it.
    pub match_unique_simple_names: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_packages: vec!["java.lang".to_string()],
            match_unique_simple_names: true,
        }
    }
}

/// Registry of classes, keyed by qualified name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: FxHashMap<TypeName, ClassEntry>,
    /// Simple name -> every registered class with that simple name.
    by_simple_name: FxHashMap<String, Vec<TypeName>>,
    hierarchy: ClassHierarchy,
    config: RegistryConfig,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a class.
    ///
    /// Supertypes may be registered later; until then they contribute a name
    /// to the ancestor list but no fields.
    pub fn register(&mut self, class: ClassEntry) -> Result<(), RegistrationError> {
        if self.classes.contains_key(&class.name) {
            return Err(RegistrationError::DuplicateType {
                name: class.name.to_string(),
            });
        }
        for (i, entry) in class.fields.iter().enumerate() {
            let name = &entry.descriptor.name;
            if class.fields[..i].iter().any(|e| &e.descriptor.name == name) {
                return Err(RegistrationError::DuplicateField {
                    type_name: class.name.to_string(),
                    field: name.clone(),
                });
            }
        }

        self.hierarchy.add_supertypes(&class.name, class.supertypes())?;
        self.by_simple_name
            .entry(class.name.simple_name().to_string())
            .or_default()
            .push(class.name.clone());
        self.classes.insert(class.name.clone(), class);
        Ok(())
    }

    pub fn get(&self, name: &TypeName) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The [`ObjectType`] of a registered class, with its ancestors filled in.
    pub fn object_type(&self, name: &TypeName) -> Option<ObjectType> {
        if !self.classes.contains_key(name) {
            return None;
        }
        Some(ObjectType::new(name.clone(), self.hierarchy.ancestors(name)))
    }

    /// Map a dotted name as written in a rule to a registered class.
    ///
    /// Tries the name as written, then under each default package, then (for
    /// a bare simple name) the single registered class with that simple name.
    pub fn resolve_name(&self, written: &str) -> Option<TypeName> {
        let exact = TypeName::new(written);
        if self.classes.contains_key(&exact) {
            return Some(exact);
        }

        for package in &self.config.default_packages {
            let expanded = TypeName::from_parts(package, written);
            if self.classes.contains_key(&expanded) {
                return Some(expanded);
            }
        }

        if self.config.match_unique_simple_names && !written.contains('.') {
            if let Some([only]) = self.by_simple_name.get(written).map(Vec::as_slice) {
                return Some(only.clone());
            }
        }
        None
    }

    /// Allocate an instance of `name` with every instance field (declared or
    /// inherited) set to its initial value.
    pub fn instantiate(
        &self,
        heap: &mut ObjectHeap,
        name: &TypeName,
    ) -> Result<ObjectHandle, RegistrationError> {
        let object_type = self
            .object_type(name)
            .ok_or_else(|| RegistrationError::UnknownType {
                name: name.to_string(),
            })?;
        let lineage: Vec<&ClassEntry> = std::iter::once(name)
            .chain(object_type.ancestors.iter())
            .filter_map(|ancestor| self.classes.get(ancestor))
            .collect();

        let handle = heap.allocate(object_type);
        for class in lineage {
            for entry in class.fields.iter().filter(|e| !e.descriptor.is_static()) {
                let ty = self.ensure_type(&entry.descriptor.value_class);
                let initial = entry.initial.unwrap_or_else(|| Value::default_for(&ty));
                heap.define_field(handle, &entry.descriptor, ty, initial)
                    .map_err(|err| invalid_initial(&entry.descriptor, err))?;
            }
        }
        Ok(handle)
    }

    /// Store the initial value of every registered static field in `heap`.
    pub fn install_statics(&self, heap: &mut ObjectHeap) -> Result<(), RegistrationError> {
        for class in self.classes.values() {
            for entry in class.fields.iter().filter(|e| e.descriptor.is_static()) {
                let ty = self.ensure_type(&entry.descriptor.value_class);
                let initial = entry.initial.unwrap_or_else(|| Value::default_for(&ty));
                heap.define_static(&entry.descriptor, ty, initial)
                    .map_err(|err| invalid_initial(&entry.descriptor, err))?;
            }
        }
        Ok(())
    }
}

fn invalid_initial(field: &FieldDescriptor, err: impl std::fmt::Display) -> RegistrationError {
    RegistrationError::InvalidInitialValue {
        field: field.to_string(),
        message: err.to_string(),
    }
}

impl TypeUniverse for TypeRegistry {
    fn match_path(&self, segments: &[String]) -> Option<Type> {
        for count in (1..=segments.len()).rev() {
            let written = segments[..count].join(".");
            if let Some(name) = self.resolve_name(&written) {
                debug!("path '{written}' matched type {name} using {count} segment(s)");
                return self.object_type(&name).map(Type::Object);
            }
        }
        None
    }

    fn ensure_type(&self, descriptor: &TypeDescriptor) -> Type {
        match descriptor {
            TypeDescriptor::Void => Type::Void,
            TypeDescriptor::Primitive(kind) => Type::Primitive(*kind),
            TypeDescriptor::Class(name) => self
                .object_type(name)
                .map_or(Type::Undefined, Type::Object),
        }
    }

    fn lookup_field(&self, owner: &ObjectType, name: &str) -> Option<FieldDescriptor> {
        std::iter::once(&owner.name)
            .chain(owner.ancestors.iter())
            .filter_map(|class| self.classes.get(class))
            .find_map(|class| class.find_field(name))
            .map(|entry| entry.descriptor.clone())
    }
}
