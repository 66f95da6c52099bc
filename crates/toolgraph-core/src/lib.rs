pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod ir;
pub mod node;

// Re-export commonly used types
pub use edge::Edge;
pub use error::CoreError;
pub use graph::DependencyGraph;
pub use id::{EdgeId, NodeId, NodeKind};
pub use ir::{ComputedDef, InputDef, InputKind, Ir, ObserverDef, OutputDef, OutputKind};
pub use node::{ComputedNode, InputNode, Node, OutputNode};
