//! DependencyGraph: the node and edge container produced by the graph builder.
//!
//! Nodes are keyed by [`NodeId`] and edges by their deterministic [`EdgeId`],
//! both in insertion order. Edges are stored independently of node
//! existence: a reference to an undeclared entity becomes a dangling edge
//! rather than an error, and consumers decide how to treat it.
//!
//! For introspection the graph can be projected onto a petgraph
//! [`StableGraph`] (dangling edges omitted) and rendered as Graphviz DOT.

use indexmap::IndexMap;
use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::id::{EdgeId, NodeId, NodeKind};
use crate::node::Node;

/// The dependency graph of one application.
///
/// Built once per analysis and treated as immutable afterwards. Insertion
/// order of nodes and edges is preserved and is what downstream passes use
/// for deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GraphParts", into = "GraphParts")]
pub struct DependencyGraph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

/// Wire form of a [`DependencyGraph`]: keys are derivable from the values.
#[derive(Serialize, Deserialize)]
struct GraphParts {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl From<DependencyGraph> for GraphParts {
    fn from(graph: DependencyGraph) -> Self {
        GraphParts {
            nodes: graph.nodes.into_values().collect(),
            edges: graph.edges.into_values().collect(),
        }
    }
}

impl From<GraphParts> for DependencyGraph {
    fn from(parts: GraphParts) -> Self {
        let mut graph = DependencyGraph::new();
        for node in parts.nodes {
            graph.add_node(node);
        }
        for edge in parts.edges {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Mutation (graph builder only)
    // -----------------------------------------------------------------------

    /// Inserts a node. Returns `false` and keeps the existing node if one
    /// with the same id is already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Inserts the edge `from -> to` unless an edge with the same id exists.
    /// Endpoints are not required to exist. Returns `true` if inserted.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let edge = Edge::new(from, to);
        let id = edge.id();
        if self.edges.contains_key(&id) {
            return false;
        }
        self.edges.insert(id, edge);
        true
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insertion position of a node, usable as a dense arena index.
    pub fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// All edges in insertion order, including dangling ones.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Nodes of one kind in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// Edges with at least one endpoint that is not a node in this graph.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .values()
            .filter(|e| !self.contains_node(&e.from) || !self.contains_node(&e.to))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Projects the graph onto a petgraph `StableGraph`.
    ///
    /// Node indices follow insertion order. Dangling edges have no node to
    /// attach to and are left out.
    pub fn to_petgraph(&self) -> StableGraph<NodeId, EdgeId, Directed, u32> {
        let mut out = StableGraph::with_capacity(self.nodes.len(), self.edges.len());
        for id in self.nodes.keys() {
            out.add_node(id.clone());
        }
        for (edge_id, edge) in &self.edges {
            let (Some(from), Some(to)) = (self.node_index(&edge.from), self.node_index(&edge.to))
            else {
                continue;
            };
            out.add_edge(NodeIndex::new(from), NodeIndex::new(to), edge_id.clone());
        }
        out
    }

    /// Renders the resolvable part of the graph as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}
