//! Advisory warnings and the pattern scan over the raw IR.
//!
//! [`Warning`] covers both the unsupported-pattern findings produced by
//! [`diagnose`] and the unresolved references found by the closure resolver.
//! Warnings never stop an analysis; they travel with the result.

use serde::{Deserialize, Serialize};
use toolgraph_core::{InputKind, Ir, OutputKind};

/// A non-fatal finding attached to an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Outputs that generate markup at runtime and cannot be mechanically
    /// retargeted.
    #[error(
        "dynamic UI outputs need manual conversion: {}",
        .outputs.join(", ")
    )]
    DynamicUi {
        /// Ids of the offending outputs, in declaration order.
        outputs: Vec<String>,
    },

    /// Raw file upload inputs, unsupported by the target.
    #[error("file upload inputs are not supported: {}", .inputs.join(", "))]
    FileUpload {
        /// Ids of the offending inputs, in declaration order.
        inputs: Vec<String>,
    },

    /// Side-effect subscriptions; each one needs manual review.
    #[error("{count} observer(s) with side effects need manual review")]
    SideEffects {
        /// Number of observers in the IR.
        count: usize,
    },

    /// Downloadable file handlers.
    #[error(
        "file download outputs are not supported: {}",
        .outputs.join(", ")
    )]
    FileDownload {
        /// Ids of the offending outputs, in declaration order.
        outputs: Vec<String>,
    },

    /// A computed dependency names something with no definition.
    #[error("unresolved computed reference '{name}'")]
    UnresolvedComputed {
        /// The name that could not be resolved.
        name: String,
    },
}

/// Scans the IR for constructs the conversion cannot handle.
///
/// Emits at most one warning per category, in a fixed category order.
/// Independent of the dependency graph.
pub fn diagnose(ir: &Ir) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let dynamic_ui = output_ids_of_kind(ir, &OutputKind::Ui);
    if !dynamic_ui.is_empty() {
        warnings.push(Warning::DynamicUi {
            outputs: dynamic_ui,
        });
    }

    let uploads: Vec<String> = ir
        .inputs
        .iter()
        .filter(|i| i.kind == InputKind::File)
        .map(|i| i.id.clone())
        .collect();
    if !uploads.is_empty() {
        warnings.push(Warning::FileUpload { inputs: uploads });
    }

    if !ir.observers.is_empty() {
        warnings.push(Warning::SideEffects {
            count: ir.observers.len(),
        });
    }

    let downloads = output_ids_of_kind(ir, &OutputKind::Download);
    if !downloads.is_empty() {
        warnings.push(Warning::FileDownload { outputs: downloads });
    }

    warnings
}

fn output_ids_of_kind(ir: &Ir, kind: &OutputKind) -> Vec<String> {
    ir.outputs
        .iter()
        .filter(|o| &o.kind == kind)
        .map(|o| o.id.clone())
        .collect()
}
