use log::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => Level::Info,
            Severity::Warning => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

/// Receives the user-facing diagnostics of a run.
///
/// Every stage takes a sink instead of logging directly so that callers decide where
/// skipped rows and unavailable files are reported.
pub trait DiagnosticSink {
    fn emit(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Severity::Error, message);
    }
}

/// Forwards diagnostics to the `log` facade.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, severity: Severity, message: &str) {
        log::log!(Level::from(severity), "{}", message);
    }
}
