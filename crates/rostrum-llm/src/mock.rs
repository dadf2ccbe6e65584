//! Mock chat backend for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use rostrum_core::Turn;

use crate::backend::{ChatBackend, LlmError};

/// A call captured by a recording mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub turns: Vec<Turn>,
}

/// A mock backend that returns predefined responses.
///
/// Lets the engine and API tests run a full debate without network access.
#[derive(Debug)]
pub struct MockBackend {
    name: String,
    /// Canned responses; cycles when exhausted.
    responses: Vec<String>,
    index: AtomicUsize,
    /// When true, every call fails with `NotAvailable`.
    fail: bool,
    /// When set, calls at or after this zero-based index fail.
    fail_from: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    /// Create a mock cycling through the given responses.
    pub fn scripted(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            fail: false,
            fail_from: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock that always returns the same response.
    pub fn constant(response: &str) -> Self {
        Self::scripted(vec![response.to_string()])
    }

    /// A mock that records every call and returns a constant reply.
    pub fn recording(response: &str) -> Self {
        let mut mock = Self::constant(response);
        mock.name = "recording-mock".to_string();
        mock
    }

    /// A mock whose every call fails, for backend-outage tests.
    pub fn failing() -> Self {
        Self {
            name: "failing-mock".to_string(),
            responses: Vec::new(),
            index: AtomicUsize::new(0),
            fail: true,
            fail_from: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A debater mock whose calls start failing at the given zero-based
    /// call index, for mid-operation outage tests.
    pub fn failing_from(call_index: usize) -> Self {
        let mut mock = Self::debater();
        mock.name = "flaky-mock".to_string();
        mock.fail_from = Some(call_index);
        mock
    }

    /// A mock that speaks like a debater: replies echo the phase keyword of
    /// the last prompt, so engine tests can assert which prompt produced
    /// which transcript entry.
    pub fn debater() -> Self {
        let mut mock = Self::scripted(Vec::new());
        mock.name = "debater-mock".to_string();
        mock
    }

    /// Calls seen so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn debater_reply(&self, turns: &[Turn]) -> String {
        let last = turns.last().map(|t| t.content.as_str()).unwrap_or("");
        let lower = last.to_lowercase();

        // Judge prompts embed the whole transcript, so their keyword must
        // win over phase keywords quoted inside it.
        if lower.contains("who won") {
            "pro".to_string()
        } else if lower.starts_with("rebuttal") {
            "A pointed rebuttal.".to_string()
        } else if lower.contains("opening statement") {
            "A confident opening statement.".to_string()
        } else if lower.contains("closing argument") {
            "A sweeping closing argument.".to_string()
        } else {
            "A measured answer to the question.".to_string()
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.fail
    }

    async fn converse(&self, system: &str, turns: &[Turn]) -> Result<String, LlmError> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                system: system.to_string(),
                turns: turns.to_vec(),
            });
            calls.len() - 1
        };

        if self.fail || self.fail_from.is_some_and(|from| call_index >= from) {
            return Err(LlmError::NotAvailable);
        }

        if self.responses.is_empty() {
            return Ok(self.debater_reply(turns));
        }

        let i = self.index.fetch_add(1, Ordering::SeqCst) % self.responses.len();
        Ok(self.responses[i].clone())
    }
}
