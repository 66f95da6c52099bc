//! Dependency analysis for reactive applications.
//!
//! Given an [`Ir`], [`analyze`] builds the dependency graph, partitions it
//! into connected components and materializes each component into a
//! [`ToolGroup`]. Pattern diagnostics run independently over the raw IR.
//!
//! The whole pipeline is pure: no I/O, no shared state, one owned graph and
//! union-find table per call. Only an IR that fails validation is an error;
//! every other anomaly ends up in [`AnalysisResult::warnings`].

pub mod builder;
pub mod closure;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod materialize;
pub mod partition;

pub use builder::build_graph;
pub use closure::{expand_computed_closure, expanded_input_deps, Closure, ComputedIndex};
pub use config::{AnalysisConfig, UnresolvedPolicy};
pub use diagnostics::{diagnose, Warning};
pub use error::AnalysisError;
pub use materialize::{materialize, Materialized, ToolGroup};
pub use partition::{find_components, DisjointSet};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use toolgraph_core::{DependencyGraph, Ir};
use tracing::{debug, debug_span};

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The dependency graph, for introspection and debugging.
    pub graph: DependencyGraph,
    /// One tool group per connected component.
    pub tool_groups: Vec<ToolGroup>,
    /// Advisory findings: pattern diagnostics first, then unresolved references.
    pub warnings: Vec<Warning>,
}

impl AnalysisResult {
    /// Warnings rendered as human-readable messages.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// The tool group that produces `output_id`, if any.
    pub fn group_for_output(&self, output_id: &str) -> Option<&ToolGroup> {
        self.tool_groups.iter().find(|g| g.has_output(output_id))
    }
}

/// Analyzes an IR with the default configuration.
pub fn analyze(ir: &Ir) -> Result<AnalysisResult, AnalysisError> {
    analyze_with_config(ir, &AnalysisConfig::default())
}

/// Analyzes an IR.
///
/// Validates the IR first; a contract violation is the only failure.
pub fn analyze_with_config(
    ir: &Ir,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let span = debug_span!(
        "analyze",
        inputs = ir.inputs.len(),
        outputs = ir.outputs.len(),
        computed = ir.computed.len()
    );
    let _guard = span.enter();

    ir.validate()?;

    let graph = build_graph(ir);
    let components = find_components(&graph);
    let index = ComputedIndex::new(&ir.computed);

    // IndexSet keeps first-seen order while dropping repeats across groups.
    let mut warnings: IndexSet<Warning> = diagnose(ir).into_iter().collect();
    let mut tool_groups = Vec::with_capacity(components.len());
    for component in &components {
        let materialized = materialize(component, ir, &index, config);
        warnings.extend(materialized.warnings);
        tool_groups.push(materialized.group);
    }

    debug!(
        tool_groups = tool_groups.len(),
        warnings = warnings.len(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        graph,
        tool_groups,
        warnings: warnings.into_iter().collect(),
    })
}
