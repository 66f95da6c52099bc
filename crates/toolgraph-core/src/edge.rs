//! Edge type for the dependency graph.
//!
//! An [`Edge`] means "`from` is read when computing `to`". Endpoints are
//! plain [`NodeId`]s, so an edge may point at a node that was never declared;
//! such dangling edges are kept in the graph and skipped by consumers that
//! need both endpoints.

use serde::{Deserialize, Serialize};

use crate::id::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Edge { from, to }
    }

    pub fn id(&self) -> EdgeId {
        EdgeId::between(&self.from, &self.to)
    }
}
