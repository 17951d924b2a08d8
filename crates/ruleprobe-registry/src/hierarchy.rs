//! Supertype graph over registered class names.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: class names (registered or only referenced as a supertype)
//! - Edges: subtype -> supertype, in declaration order

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use ruleprobe_core::{RegistrationError, TypeName};

#[derive(Debug, Default)]
pub(crate) struct ClassHierarchy {
    graph: DiGraph<TypeName, ()>,
    nodes: FxHashMap<TypeName, NodeIndex>,
}

impl ClassHierarchy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, name: &TypeName) -> NodeIndex {
        if let Some(&node) = self.nodes.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.clone());
        self.nodes.insert(name.clone(), node);
        node
    }

    /// Record that `name` directly extends or implements each of `supertypes`.
    ///
    /// Nothing is recorded if any edge would close a cycle.
    pub(crate) fn add_supertypes<'a>(
        &mut self,
        name: &TypeName,
        supertypes: impl IntoIterator<Item = &'a TypeName>,
    ) -> Result<(), RegistrationError> {
        let supertypes: Vec<&TypeName> = supertypes.into_iter().collect();
        let child = self.node(name);

        for supertype in &supertypes {
            let parent = self.node(supertype);
            if parent == child || has_path_connecting(&self.graph, parent, child, None) {
                return Err(RegistrationError::CircularInheritance {
                    name: name.to_string(),
                    ancestor: supertype.to_string(),
                });
            }
        }

        for supertype in supertypes {
            let parent = self.node(supertype);
            self.graph.add_edge(child, parent, ());
        }
        Ok(())
    }

    /// Every transitive supertype of `name`, nearest first.
    ///
    /// Breadth-first in declaration order, so a direct superclass always
    /// precedes its own ancestors.
    pub(crate) fn ancestors(&self, name: &TypeName) -> Vec<TypeName> {
        let Some(&start) = self.nodes.get(name) else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut frontier = vec![start];
        seen.insert(start);

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for node in frontier {
                // petgraph yields neighbours newest edge first
                let mut parents: Vec<NodeIndex> = self
                    .graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .collect();
                parents.reverse();
                for parent in parents {
                    if seen.insert(parent) {
                        order.push(self.graph[parent].clone());
                        next.push(parent);
                    }
                }
            }
            frontier = next;
        }
        order
    }
}
