//! Rule bindings visible to field expressions.
//!
//! A rule's `BIND` clause and trigger context introduce named values
//! (`$0`, `$this`, user bindings). Expressions only look bindings up; the
//! table is owned and populated by whoever prepares the rule.

use ruleprobe_core::Type;
use rustc_hash::FxHashMap;

/// A named value available to rule expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    /// First local slot holding the value in emitted code.
    pub slot: u32,
}

/// Lookup of bindings by name.
pub trait BindingLookup {
    fn lookup(&self, name: &str) -> Option<&Binding>;

    fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// Binding table with slot allocation.
///
/// Slots are assigned in declaration order. Two-slot values (`long`,
/// `double`) take two consecutive slots.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_name: FxHashMap<String, Binding>,
    next_slot: u32,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a binding and return its slot.
    ///
    /// Redeclaring a name replaces the binding with a fresh slot.
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) -> u32 {
        let name = name.into();
        let slot = self.next_slot;
        self.next_slot += ty.width();
        self.by_name.insert(name.clone(), Binding { name, ty, slot });
        slot
    }

    /// Total slots allocated so far.
    pub fn slot_count(&self) -> u32 {
        self.next_slot
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.by_name.values()
    }
}

impl BindingLookup for Bindings {
    fn lookup(&self, name: &str) -> Option<&Binding> {
        self.by_name.get(name)
    }
}
