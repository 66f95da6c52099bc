//! Connected components of the dependency graph.
//!
//! Edge direction is irrelevant for grouping: anything that reads or is read
//! by something else belongs with it. Components are found with a
//! [`DisjointSet`] over the graph's dense node positions, so each run owns its
//! parent table outright.

use indexmap::IndexMap;
use toolgraph_core::{DependencyGraph, NodeId};
use tracing::debug;

/// Disjoint-set forest with path compression and union by rank.
///
/// Elements are `0..len`. Amortized cost per operation is O(α(n)).
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent pointers (self-loop = root)
    parent: Vec<usize>,
    /// Upper bound on tree height, valid for roots only
    rank: Vec<u8>,
    /// Number of disjoint sets
    set_count: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
            set_count: n,
        }
    }

    /// Representative of `x`'s set. Compresses the path behind it.
    ///
    /// Panics if `x` is out of range.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`. Returns `false` if they were
    /// already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.set_count -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.set_count
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Partitions the graph's nodes into connected components.
///
/// Edges with an endpoint that is not a node are skipped. Isolated nodes
/// form singleton components. Components are ordered by their first member's
/// insertion position, and members keep insertion order.
pub fn find_components(graph: &DependencyGraph) -> Vec<Vec<NodeId>> {
    let mut sets = DisjointSet::new(graph.node_count());

    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.node_index(&edge.from), graph.node_index(&edge.to))
        else {
            debug!(edge = %edge.id(), "skipping dangling edge");
            continue;
        };
        sets.union(from, to);
    }

    let mut groups: IndexMap<usize, Vec<NodeId>> = IndexMap::with_capacity(sets.count());
    for (position, id) in graph.node_ids().enumerate() {
        let root = sets.find(position);
        groups.entry(root).or_default().push(id.clone());
    }

    debug!(components = groups.len(), "partitioned dependency graph");
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgraph_core::{ComputedDef, InputDef, InputKind, Node};

    #[test]
    fn basic_union_find() {
        let mut sets = DisjointSet::new(6);
        assert_eq!(sets.count(), 6);
        assert!(!sets.connected(0, 1));

        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(sets.connected(0, 1));
        assert!(!sets.connected(1, 2));
        assert_eq!(sets.count(), 4);

        assert!(sets.union(1, 3));
        assert!(sets.connected(0, 2));
        assert!(!sets.union(0, 3));
        assert_eq!(sets.count(), 3);
    }

    #[test]
    fn path_compression_flattens_chain() {
        let mut sets = DisjointSet::new(100);
        for i in 0..99 {
            sets.union(i, i + 1);
        }
        let root = sets.find(99);
        for i in 0..100 {
            assert_eq!(sets.find(i), root);
        }
        assert_eq!(sets.count(), 1);
    }

    #[test]
    fn empty_graph_has_no_components() {
        assert!(find_components(&DependencyGraph::new()).is_empty());
    }

    #[test]
    fn isolated_nodes_are_singletons() {
        let mut graph = DependencyGraph::new();
        graph.add_node(Node::from(&InputDef::new("a", InputKind::Text)));
        graph.add_node(Node::from(&InputDef::new("b", InputKind::Text)));

        let components = find_components(&graph);
        assert_eq!(
            components,
            vec![vec![NodeId::input("a")], vec![NodeId::input("b")]]
        );
    }

    #[test]
    fn direction_is_ignored() {
        let mut graph = DependencyGraph::new();
        graph.add_node(Node::from(&InputDef::new("x", InputKind::Text)));
        graph.add_node(Node::from(&ComputedDef::new("left")));
        graph.add_node(Node::from(&ComputedDef::new("right")));
        // left <- x -> right: joined only through the shared source.
        graph.add_edge(NodeId::input("x"), NodeId::computed("left"));
        graph.add_edge(NodeId::input("x"), NodeId::computed("right"));

        let components = find_components(&graph);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }

    #[test]
    fn dangling_edges_are_skipped() {
        let mut graph = DependencyGraph::new();
        graph.add_node(Node::from(&ComputedDef::new("a")));
        graph.add_node(Node::from(&ComputedDef::new("b")));
        graph.add_edge(NodeId::computed("ghost"), NodeId::computed("a"));
        graph.add_edge(NodeId::computed("ghost"), NodeId::computed("b"));

        let components = find_components(&graph);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn components_ordered_by_first_member() {
        let mut graph = DependencyGraph::new();
        for name in ["a", "b", "c", "d"] {
            graph.add_node(Node::from(&ComputedDef::new(name)));
        }
        graph.add_edge(NodeId::computed("d"), NodeId::computed("b"));
        graph.add_edge(NodeId::computed("c"), NodeId::computed("a"));

        let components = find_components(&graph);
        assert_eq!(
            components,
            vec![
                vec![NodeId::computed("a"), NodeId::computed("c")],
                vec![NodeId::computed("b"), NodeId::computed("d")],
            ]
        );
    }
}
