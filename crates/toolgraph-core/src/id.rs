//! Identity types for graph entities.
//!
//! A [`NodeId`] pairs a [`NodeKind`] with a textual name, so a computed value
//! and an output may share a name without colliding. An [`EdgeId`] is derived
//! deterministically from its endpoints and is what edge deduplication keys on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of entity in a reactive application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A user-settable value.
    Input,
    /// A derived value reading inputs and/or other computed values.
    Computed,
    /// A renderer consuming inputs and computed values.
    Output,
}

impl NodeKind {
    /// Lowercase label used in rendered ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Computed => "computed",
            NodeKind::Output => "output",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node identity: (kind, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeId {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        NodeId {
            kind,
            name: name.into(),
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Input, name)
    }

    pub fn computed(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Computed, name)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Output, name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Deterministic edge identifier, rendered `"{from}->{to}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Derives the id for the edge `from -> to`.
    pub fn between(from: &NodeId, to: &NodeId) -> Self {
        EdgeId(format!("{}->{}", from, to))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
