use ruleprobe_core::{ObjectGraph, Value};
use rustc_hash::FxHashMap;

use super::ExecutionContext;

/// Binding values for one rule firing, over a borrowed object graph.
pub struct Frame<'g> {
    values: FxHashMap<String, Value>,
    objects: &'g mut dyn ObjectGraph,
}

impl<'g> Frame<'g> {
    pub fn new(objects: &'g mut dyn ObjectGraph) -> Self {
        Self {
            values: FxHashMap::default(),
            objects,
        }
    }

    /// Give `name` a value for this firing.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }
}

impl ExecutionContext for Frame<'_> {
    fn binding(&self, name: &str) -> Option<Value> {
        self.value(name)
    }

    fn set_binding(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn objects(&self) -> &dyn ObjectGraph {
        &*self.objects
    }

    fn objects_mut(&mut self) -> &mut dyn ObjectGraph {
        &mut *self.objects
    }
}
