// VoxFlow — Voice session history (in-memory, newest first)

use crate::workflow::WorkflowNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// History cap: only the most recent sessions are retained.
pub const DEFAULT_MAX_SESSIONS: usize = 10;

/// One interpreter invocation: the transcript that went in, the workflow
/// that came out, and the transcription confidence supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSession {
    pub id: String,
    pub transcript: String,
    pub workflow: Vec<WorkflowNode>,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
}

/// Append-only session list, newest first, capped. Sessions are recorded by
/// the caller after each interpretation; the interpreter itself never sees
/// this type.
pub struct SessionHistory {
    max_sessions: usize,
    sessions: Arc<RwLock<VecDeque<VoiceSession>>>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            max_sessions,
            sessions: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Record a new session at the front of the history, dropping the oldest
    /// entry beyond the cap. Confidence is clamped into [0, 1]; the
    /// transcription layer occasionally reports values just outside it.
    pub async fn record(
        &self,
        transcript: impl Into<String>,
        workflow: Vec<WorkflowNode>,
        confidence: f64,
    ) -> VoiceSession {
        let session = VoiceSession {
            id: uuid::Uuid::new_v4().to_string(),
            transcript: transcript.into(),
            workflow,
            timestamp: Utc::now(),
            confidence: confidence.clamp(0.0, 1.0),
        };

        let mut sessions = self.sessions.write().await;
        sessions.push_front(session.clone());
        sessions.truncate(self.max_sessions);
        tracing::debug!(
            session = %session.id,
            total = sessions.len(),
            "recorded voice session"
        );
        session
    }

    /// Snapshot of the history, newest first.
    pub async fn recent(&self) -> Vec<VoiceSession> {
        self.sessions.read().await.iter().cloned().collect()
    }

    pub async fn latest(&self) -> Option<VoiceSession> {
        self.sessions.read().await.front().cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_newest_first_and_capped() {
        let history = SessionHistory::with_capacity(3);
        for i in 0..5 {
            history.record(format!("command {i}"), Vec::new(), 0.9).await;
        }
        let sessions = history.recent().await;
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].transcript, "command 4");
        assert_eq!(sessions[2].transcript, "command 2");
    }

    #[tokio::test]
    async fn test_confidence_clamped() {
        let history = SessionHistory::new();
        let s = history.record("hello", Vec::new(), 1.7).await;
        assert_eq!(s.confidence, 1.0);
        let s = history.record("hello", Vec::new(), -0.2).await;
        assert_eq!(s.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_clear() {
        let history = SessionHistory::new();
        history.record("hello", Vec::new(), 0.5).await;
        assert_eq!(history.len().await, 1);
        history.clear().await;
        assert!(history.is_empty().await);
        assert!(history.latest().await.is_none());
    }
}
