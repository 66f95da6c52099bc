//! Graph builder: turns an [`Ir`] into a [`DependencyGraph`].
//!
//! Nodes are inserted inputs first, then outputs, then computed values, each
//! in declaration order. Every direct reference becomes an edge pointing from
//! the referenced entity to its reader. References to entities that were
//! never declared still produce edges; the partitioner drops them.

use toolgraph_core::{DependencyGraph, Ir, Node, NodeId, NodeKind};
use tracing::debug;

/// Builds the dependency graph for an IR. Never fails.
pub fn build_graph(ir: &Ir) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for input in &ir.inputs {
        graph.add_node(Node::from(input));
    }

    for output in &ir.outputs {
        graph.add_node(Node::from(output));
        let reader = NodeId::output(output.id.as_str());
        for dep in &output.input_deps {
            graph.add_edge(NodeId::input(dep.as_str()), reader.clone());
        }
        for dep in &output.computed_deps {
            graph.add_edge(NodeId::computed(dep.as_str()), reader.clone());
        }
    }

    for def in &ir.computed {
        graph.add_node(Node::from(def));
        let reader = NodeId::computed(def.name.as_str());
        for dep in &def.input_deps {
            graph.add_edge(NodeId::input(dep.as_str()), reader.clone());
        }
        for dep in &def.computed_deps {
            graph.add_edge(NodeId::computed(dep.as_str()), reader.clone());
        }
    }

    debug!(
        inputs = graph.nodes_of_kind(NodeKind::Input).count(),
        outputs = graph.nodes_of_kind(NodeKind::Output).count(),
        computed = graph.nodes_of_kind(NodeKind::Computed).count(),
        edges = graph.edge_count(),
        dangling = graph.dangling_edges().count(),
        "built dependency graph"
    );
    graph
}
