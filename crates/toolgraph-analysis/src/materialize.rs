//! Tool group materialization.
//!
//! Turns one connected component into a [`ToolGroup`]: the inputs a caller
//! must supply, the outputs the call produces, and a generated name and
//! description. Inputs include everything reachable through computed values,
//! not only the component's own input nodes, so references to undeclared
//! inputs still show up as arguments (with placeholder metadata).
//!
//! Naming and ordering follow IR declaration order, never graph traversal
//! order, so the same IR always yields the same tool names.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use toolgraph_core::{InputDef, Ir, NodeId, NodeKind, OutputDef};
use tracing::debug;

use crate::closure::{expand_computed_closure, expanded_input_deps, ComputedIndex};
use crate::config::AnalysisConfig;
use crate::diagnostics::Warning;

/// Name given to a component with neither inputs nor outputs.
pub const UNNAMED_GROUP: &str = "unnamed_group";

/// A self-contained unit invocable as one stateless function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolGroup {
    /// Generated tool name, e.g. `update_scatter_and_stats`.
    pub name: String,
    /// Generated human-readable description.
    pub description: String,
    /// Arguments, deduplicated, in IR declaration order.
    pub inputs: Vec<InputDef>,
    /// Produced outputs, deduplicated, in IR declaration order.
    pub outputs: Vec<OutputDef>,
    /// Computed values evaluated internally. Kept for traceability only.
    pub computed: IndexSet<String>,
}

impl ToolGroup {
    pub fn input_ids(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|i| i.id.as_str())
    }

    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.id.as_str())
    }

    pub fn has_input(&self, id: &str) -> bool {
        self.inputs.iter().any(|i| i.id == id)
    }

    pub fn has_output(&self, id: &str) -> bool {
        self.outputs.iter().any(|o| o.id == id)
    }
}

/// A materialized group plus the unresolved references met while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Materialized {
    pub group: ToolGroup,
    pub warnings: Vec<Warning>,
}

/// Builds the tool group for one component. Never fails.
pub fn materialize(
    component: &[NodeId],
    ir: &Ir,
    index: &ComputedIndex<'_>,
    config: &AnalysisConfig,
) -> Materialized {
    let mut input_ids: IndexSet<&str> = IndexSet::new();
    let mut output_ids: IndexSet<&str> = IndexSet::new();
    let mut computed_names: IndexSet<&str> = IndexSet::new();
    for id in component {
        match id.kind {
            NodeKind::Input => input_ids.insert(id.name.as_str()),
            NodeKind::Output => output_ids.insert(id.name.as_str()),
            NodeKind::Computed => computed_names.insert(id.name.as_str()),
        };
    }

    // Everything the group's readers depend on, directly or via computed values.
    let mut direct_inputs: IndexSet<String> = IndexSet::new();
    let mut seeds: IndexSet<String> = IndexSet::new();
    for output in ir.outputs.iter().filter(|o| output_ids.contains(o.id.as_str())) {
        direct_inputs.extend(output.input_deps.iter().cloned());
        seeds.extend(output.computed_deps.iter().cloned());
    }
    seeds.extend(computed_names.iter().map(|name| name.to_string()));

    let closure = expand_computed_closure(&seeds, index, config.unresolved);
    let reachable_inputs = expanded_input_deps(&direct_inputs, &closure, index);

    let mut argument_ids: IndexSet<&str> = input_ids;
    argument_ids.extend(reachable_inputs.iter().map(String::as_str));

    let inputs = ordered_by_declaration(
        &argument_ids,
        &ir.inputs,
        |def| def.id.as_str(),
        InputDef::stub,
    );
    let outputs = ordered_by_declaration(
        &output_ids,
        &ir.outputs,
        |def| def.id.as_str(),
        OutputDef::stub,
    );

    let mut computed: IndexSet<String> = closure.members.clone();
    computed.extend(computed_names.iter().map(|name| name.to_string()));

    let name = tool_name(&inputs, &outputs);
    let description = tool_description(&inputs, &outputs);

    debug!(
        tool = %name,
        inputs = inputs.len(),
        outputs = outputs.len(),
        computed = computed.len(),
        "materialized tool group"
    );

    Materialized {
        group: ToolGroup {
            name,
            description,
            inputs,
            outputs,
            computed,
        },
        warnings: closure.warnings(),
    }
}

/// Declared definitions whose id is in `wanted`, in declaration order,
/// followed by stubs for wanted ids with no declaration.
fn ordered_by_declaration<T: Clone>(
    wanted: &IndexSet<&str>,
    declared: &[T],
    id_of: impl Fn(&T) -> &str,
    stub: impl Fn(&str) -> T,
) -> Vec<T> {
    let mut found: IndexSet<&str> = IndexSet::new();
    let mut out: Vec<T> = Vec::with_capacity(wanted.len());

    for def in declared {
        let id = id_of(def);
        if wanted.contains(id) && found.insert(id) {
            out.push(def.clone());
        }
    }
    for id in wanted {
        if !found.contains(id) {
            out.push(stub(id));
        }
    }
    out
}

/// `update_<outputs>`, else `set_<inputs>`, else [`UNNAMED_GROUP`].
pub fn tool_name(inputs: &[InputDef], outputs: &[OutputDef]) -> String {
    if !outputs.is_empty() {
        let ids: Vec<&str> = outputs.iter().map(|o| o.id.as_str()).collect();
        format!("update_{}", ids.join("_and_"))
    } else if !inputs.is_empty() {
        let ids: Vec<&str> = inputs.iter().map(|i| i.id.as_str()).collect();
        format!("set_{}", ids.join("_and_"))
    } else {
        UNNAMED_GROUP.to_string()
    }
}

/// `Update <outputs joined by " and "> based on <input labels joined by ", ">`.
pub fn tool_description(inputs: &[InputDef], outputs: &[OutputDef]) -> String {
    let outputs: Vec<&str> = outputs.iter().map(|o| o.id.as_str()).collect();
    let labels: Vec<&str> = inputs.iter().map(InputDef::display_label).collect();
    format!(
        "Update {} based on {}",
        outputs.join(" and "),
        labels.join(", ")
    )
}
