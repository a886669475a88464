//! Submission Delivery
//!
//! Accepted payloads are written to the browser console; no request leaves
//! the page.

use async_trait::async_trait;
use lead_core::{SubmissionPayload, SubmissionSink, SubmitError};

/// Logs payloads to the browser console
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl SubmissionSink for ConsoleSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let json = serde_json::to_string_pretty(payload)?;
        leptos::logging::log!("{}", json);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Path of the current page, sent along with the payload
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".into())
}
