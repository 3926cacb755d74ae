#[cfg(test)]
mod tests {
    use log::Level;

    use crate::diagnostics::{DiagnosticSink, Severity};
    use crate::tests::support::RecordingSink;

    #[test]
    fn test_severity_to_level() {
        assert_eq!(Level::from(Severity::Info), Level::Info);
        assert_eq!(Level::from(Severity::Warning), Level::Warn);
        assert_eq!(Level::from(Severity::Error), Level::Error);
    }

    #[test]
    fn test_sink_helpers_set_severity() {
        let sink = RecordingSink::new();
        sink.info("loaded");
        sink.warning("skipped");
        sink.error("failed");

        assert_eq!(sink.messages(Severity::Info), vec!["loaded".to_string()]);
        assert_eq!(sink.messages(Severity::Warning), vec!["skipped".to_string()]);
        assert_eq!(sink.messages(Severity::Error), vec!["failed".to_string()]);
    }
}
