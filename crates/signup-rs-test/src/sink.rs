//! A [`SubmissionSink`] that records accepted submissions for inspection.

use std::sync::Mutex;

use signup_rs_forms::FormValues;
use signup_rs_http::SubmissionSink;

/// Keeps every accepted submission in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    accepted: Mutex<Vec<FormValues>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the accepted submissions, oldest first.
    pub fn accepted(&self) -> Vec<FormValues> {
        self.accepted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the number of accepted submissions.
    pub fn len(&self) -> usize {
        self.accepted.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubmissionSink for RecordingSink {
    fn accept(&self, data: &FormValues) {
        if let Ok(mut guard) = self.accepted.lock() {
            guard.push(data.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());
        sink.accept(&FormValues::new().with("name", "first"));
        sink.accept(&FormValues::new().with("name", "second"));
        let accepted = sink.accepted();
        assert_eq!(sink.len(), 2);
        assert_eq!(accepted[1].get("name").and_then(|v| v.as_text()), Some("second"));
    }
}
