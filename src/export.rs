// VoxFlow — Workflow export: pretty JSON with a metadata envelope

use crate::workflow::WorkflowNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed source tag stamped into every export.
pub const EXPORT_SOURCE: &str = "voice-command";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: workflow is empty")]
    EmptyWorkflow,
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize workflow: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub created: DateTime<Utc>,
    pub source: String,
    pub transcript: String,
}

/// The interchange document: the node sequence plus provenance metadata.
/// The interpreter produces the nodes; this type only serializes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExport {
    pub nodes: Vec<WorkflowNode>,
    pub metadata: ExportMetadata,
}

impl WorkflowExport {
    pub fn new(
        nodes: Vec<WorkflowNode>,
        transcript: impl Into<String>,
    ) -> Result<Self, ExportError> {
        if nodes.is_empty() {
            return Err(ExportError::EmptyWorkflow);
        }
        Ok(Self {
            nodes,
            metadata: ExportMetadata {
                created: Utc::now(),
                source: EXPORT_SOURCE.to_string(),
                transcript: transcript.into(),
            },
        })
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the export into `dir` as `comfyui-workflow-<unix-millis>.json`.
    /// Atomic write: temp file then rename.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let filename = format!(
            "comfyui-workflow-{}.json",
            self.metadata.created.timestamp_millis()
        );
        let path = dir.join(filename);

        tokio::fs::create_dir_all(dir).await?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, self.to_json()?).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::info!(path = %path.display(), nodes = self.nodes.len(), "exported workflow");
        Ok(path)
    }
}
