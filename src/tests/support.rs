use std::cell::RefCell;

use crate::diagnostics::{DiagnosticSink, Severity};

/// Keeps every diagnostic so tests can assert on what a stage reported.
#[derive(Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<(Severity, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .count()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}
