//! The intermediate representation consumed by the analysis engine.
//!
//! An [`Ir`] is the structural description of a reactive application as
//! produced by the upstream extraction step: inputs, outputs, computed values
//! and observers, each annotated with its direct references. Every collection
//! is order-preserving because tool naming is driven by declaration order.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Widget kind of an input. Unrecognized kinds are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    Text,
    Numeric,
    Slider,
    Select,
    Checkbox,
    Radio,
    Date,
    DateRange,
    /// Raw file upload. Flagged by pattern diagnostics.
    File,
    Action,
    /// Placeholder for inputs referenced but never declared.
    Unknown,
    Other(String),
}

impl InputKind {
    pub fn as_str(&self) -> &str {
        match self {
            InputKind::Text => "text",
            InputKind::Numeric => "numeric",
            InputKind::Slider => "slider",
            InputKind::Select => "select",
            InputKind::Checkbox => "checkbox",
            InputKind::Radio => "radio",
            InputKind::Date => "date",
            InputKind::DateRange => "date_range",
            InputKind::File => "file",
            InputKind::Action => "action",
            InputKind::Unknown => "unknown",
            InputKind::Other(s) => s,
        }
    }
}

impl From<String> for InputKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => InputKind::Text,
            "numeric" => InputKind::Numeric,
            "slider" => InputKind::Slider,
            "select" => InputKind::Select,
            "checkbox" => InputKind::Checkbox,
            "radio" => InputKind::Radio,
            "date" => InputKind::Date,
            "date_range" => InputKind::DateRange,
            "file" => InputKind::File,
            "action" => InputKind::Action,
            "unknown" => InputKind::Unknown,
            _ => InputKind::Other(s),
        }
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Renderer kind of an output. Opaque to the graph; only diagnostics look at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputKind {
    Plot,
    Table,
    Text,
    Print,
    Image,
    /// Dynamically generated markup. Cannot be mechanically retargeted.
    Ui,
    /// Downloadable file handler.
    Download,
    /// Placeholder for outputs referenced but never declared.
    Unknown,
    Other(String),
}

impl OutputKind {
    pub fn as_str(&self) -> &str {
        match self {
            OutputKind::Plot => "plot",
            OutputKind::Table => "table",
            OutputKind::Text => "text",
            OutputKind::Print => "print",
            OutputKind::Image => "image",
            OutputKind::Ui => "ui",
            OutputKind::Download => "download",
            OutputKind::Unknown => "unknown",
            OutputKind::Other(s) => s,
        }
    }
}

impl From<String> for OutputKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "plot" => OutputKind::Plot,
            "table" => OutputKind::Table,
            "text" => OutputKind::Text,
            "print" => OutputKind::Print,
            "image" => OutputKind::Image,
            "ui" => OutputKind::Ui,
            "download" => OutputKind::Download,
            "unknown" => OutputKind::Unknown,
            _ => OutputKind::Other(s),
        }
    }
}

impl From<OutputKind> for String {
    fn from(kind: OutputKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A user-settable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Widget arguments as extracted from source, uninterpreted.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub raw_args: IndexMap<String, serde_json::Value>,
}

impl InputDef {
    pub fn new(id: impl Into<String>, kind: InputKind) -> Self {
        InputDef {
            id: id.into(),
            kind,
            label: None,
            raw_args: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Placeholder for an input that is referenced but not declared.
    pub fn stub(id: &str) -> Self {
        InputDef::new(id, InputKind::Unknown).with_label(id)
    }

    /// Display label, falling back to the id.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// An output renderer and its direct references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OutputKind,
    #[serde(default)]
    pub input_deps: IndexSet<String>,
    #[serde(default)]
    pub computed_deps: IndexSet<String>,
}

impl OutputDef {
    pub fn new(id: impl Into<String>, kind: OutputKind) -> Self {
        OutputDef {
            id: id.into(),
            kind,
            input_deps: IndexSet::new(),
            computed_deps: IndexSet::new(),
        }
    }

    pub fn reading_inputs<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_deps.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn reading_computed<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.computed_deps.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Placeholder for an output that is referenced but not declared.
    pub fn stub(id: &str) -> Self {
        OutputDef::new(id, OutputKind::Unknown)
    }
}

/// A named derived value and its direct references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedDef {
    pub name: String,
    #[serde(default)]
    pub input_deps: IndexSet<String>,
    #[serde(default)]
    pub computed_deps: IndexSet<String>,
}

impl ComputedDef {
    pub fn new(name: impl Into<String>) -> Self {
        ComputedDef {
            name: name.into(),
            input_deps: IndexSet::new(),
            computed_deps: IndexSet::new(),
        }
    }

    pub fn reading_inputs<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_deps.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn reading_computed<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.computed_deps.extend(deps.into_iter().map(Into::into));
        self
    }
}

/// A side-effect subscription. Tracked only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverDef {
    pub kind: String,
    #[serde(default)]
    pub input_deps: IndexSet<String>,
}

/// The full structural description of one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ir {
    #[serde(default)]
    pub inputs: Vec<InputDef>,
    #[serde(default)]
    pub outputs: Vec<OutputDef>,
    #[serde(default)]
    pub computed: Vec<ComputedDef>,
    #[serde(default)]
    pub observers: Vec<ObserverDef>,
}

impl Ir {
    /// Parses an IR document from JSON. Does not validate.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks the structural contract: non-empty identifiers everywhere and
    /// unique ids within each entity kind. Dangling references are allowed.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = IndexSet::new();
        for input in &self.inputs {
            non_empty(&input.id, "input id")?;
            if !seen.insert(input.id.as_str()) {
                return Err(CoreError::DuplicateInput {
                    id: input.id.clone(),
                });
            }
        }

        let mut seen = IndexSet::new();
        for output in &self.outputs {
            non_empty(&output.id, "output id")?;
            if !seen.insert(output.id.as_str()) {
                return Err(CoreError::DuplicateOutput {
                    id: output.id.clone(),
                });
            }
            check_refs(&output.input_deps, &output.id)?;
            check_refs(&output.computed_deps, &output.id)?;
        }

        let mut seen = IndexSet::new();
        for def in &self.computed {
            non_empty(&def.name, "computed name")?;
            if !seen.insert(def.name.as_str()) {
                return Err(CoreError::DuplicateComputed {
                    name: def.name.clone(),
                });
            }
            check_refs(&def.input_deps, &def.name)?;
            check_refs(&def.computed_deps, &def.name)?;
        }

        for observer in &self.observers {
            check_refs(&observer.input_deps, &observer.kind)?;
        }

        Ok(())
    }
}

fn non_empty(name: &str, context: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::EmptyIdentifier {
            context: context.to_string(),
        });
    }
    Ok(())
}

fn check_refs(refs: &IndexSet<String>, owner: &str) -> Result<(), CoreError> {
    refs.iter()
        .try_for_each(|r| non_empty(r, &format!("references of '{}'", owner)))
}
