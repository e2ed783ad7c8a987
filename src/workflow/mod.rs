// VoxFlow — Workflow data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered string-keyed parameter map. Keys are not fixed across node types;
/// values may be strings, numbers, booleans, or nested structures.
pub type Parameters = Map<String, Value>;

// ---------------------------------------------------------------------------
// Node type
// ---------------------------------------------------------------------------

/// The stage kind of a workflow node. Determines customization eligibility
/// (only `Generation` and `Processing` nodes are rewritten) and display
/// grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Input,
    Processing,
    Generation,
    Output,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Input => "input",
            NodeType::Processing => "processing",
            NodeType::Generation => "generation",
            NodeType::Output => "output",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Nodes and templates
// ---------------------------------------------------------------------------

/// Upstream/downstream node ids. Reserved for graph wiring; the interpreter
/// never populates this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConnections {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// A single pipeline stage.
///
/// Cloning a node deep-copies its parameter map, so a cloned node can be
/// mutated without touching the template prototype it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub description: String,
    pub parameters: Parameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<NodeConnections>,
}

impl WorkflowNode {
    /// Build a node from a `serde_json::json!` object literal. Non-object
    /// values yield an empty parameter map.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        node_type: NodeType,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Parameters::new(),
        };
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            description: description.into(),
            parameters,
            connections: None,
        }
    }

    /// Set or overwrite a single parameter.
    pub fn set_param(&mut self, key: &str, value: Value) {
        self.parameters.insert(key.to_string(), value);
    }
}

/// A reusable workflow blueprint: matching keywords plus a prototype node
/// sequence, established at catalog-definition time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub nodes: Vec<WorkflowNode>,
}
