//! Submission Sinks
//!
//! The controller never delivers payloads itself. Whoever hosts the form
//! hands accepted payloads to a `SubmissionSink`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::SubmitError;
use crate::payload::SubmissionPayload;

/// Downstream receiver of accepted submissions (Strategy pattern)
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver one payload
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError>;

    /// Sink name for logs
    fn name(&self) -> &str;
}

/// Hand a payload to `sink`, retrying transport failures.
///
/// At most `attempts` deliveries are made (at least one). Non-retryable
/// errors are returned immediately.
pub async fn deliver(
    sink: &dyn SubmissionSink,
    payload: &SubmissionPayload,
    attempts: usize,
) -> Result<(), SubmitError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match sink.submit(payload).await {
            Ok(()) => {
                tracing::info!(sink = sink.name(), attempt, "Submission delivered");
                return Ok(());
            }
            Err(e) if e.is_retryable() && attempt < attempts => {
                tracing::warn!(sink = sink.name(), attempt, "Delivery failed, retrying: {}", e);
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(sink = sink.name(), attempt, "Delivery failed: {}", e);
                return Err(e);
            }
        }
    }
}

/// In-memory sink (for testing/demo)
#[derive(Debug, Default)]
pub struct MemorySink {
    payloads: RwLock<Vec<SubmissionPayload>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far, oldest first
    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads
            .read()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.payloads.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let mut payloads = self
            .payloads
            .write()
            .map_err(|_| SubmitError::Transport("memory sink lock poisoned".into()))?;
        payloads.push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
