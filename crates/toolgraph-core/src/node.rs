//! Node types for the dependency graph.
//!
//! [`Node`] is a closed sum over the three entity kinds. Computed values and
//! outputs carry their direct dependencies so the graph can be inspected
//! without going back to the IR.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::{NodeId, NodeKind};
use crate::ir::{ComputedDef, InputDef, OutputDef};

/// A user-settable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputNode {
    pub name: String,
}

/// A derived value with its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedNode {
    pub name: String,
    pub input_deps: IndexSet<String>,
    pub computed_deps: IndexSet<String>,
}

/// An output renderer with its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputNode {
    pub name: String,
    pub input_deps: IndexSet<String>,
    pub computed_deps: IndexSet<String>,
}

/// A node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Input(InputNode),
    Computed(ComputedNode),
    Output(OutputNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Input(_) => NodeKind::Input,
            Node::Computed(_) => NodeKind::Computed,
            Node::Output(_) => NodeKind::Output,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Input(n) => &n.name,
            Node::Computed(n) => &n.name,
            Node::Output(n) => &n.name,
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId::new(self.kind(), self.name())
    }

    /// Direct input dependencies. `None` for inputs.
    pub fn input_deps(&self) -> Option<&IndexSet<String>> {
        match self {
            Node::Input(_) => None,
            Node::Computed(n) => Some(&n.input_deps),
            Node::Output(n) => Some(&n.input_deps),
        }
    }

    /// Direct computed dependencies. `None` for inputs.
    pub fn computed_deps(&self) -> Option<&IndexSet<String>> {
        match self {
            Node::Input(_) => None,
            Node::Computed(n) => Some(&n.computed_deps),
            Node::Output(n) => Some(&n.computed_deps),
        }
    }
}

impl From<&InputDef> for Node {
    fn from(def: &InputDef) -> Self {
        Node::Input(InputNode {
            name: def.id.clone(),
        })
    }
}

impl From<&ComputedDef> for Node {
    fn from(def: &ComputedDef) -> Self {
        Node::Computed(ComputedNode {
            name: def.name.clone(),
            input_deps: def.input_deps.clone(),
            computed_deps: def.computed_deps.clone(),
        })
    }
}

impl From<&OutputDef> for Node {
    fn from(def: &OutputDef) -> Self {
        Node::Output(OutputNode {
            name: def.id.clone(),
            input_deps: def.input_deps.clone(),
            computed_deps: def.computed_deps.clone(),
        })
    }
}
