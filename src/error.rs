use std::{fmt, io};

use crate::parsers::parser::ReadError;

/// Failures raised while loading, classifying or writing a report.
///
/// Only `DestinationUnavailable` ends a run. The other variants are reported to the
/// diagnostic sink and the affected row, record or stage is skipped.
#[derive(Debug)]
pub enum FlowTagError {
    /// An input file could not be opened or read.
    SourceUnavailable { path: String, source: ReadError },
    /// A lookup table row failed validation.
    MalformedRow { line: u64, reason: String },
    /// A flow log line is too short or carries a non-numeric destination port.
    MalformedRecord { line: u64, reason: String },
    /// The report could not be written.
    DestinationUnavailable { path: String, source: io::Error },
}

impl fmt::Display for FlowTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowTagError::SourceUnavailable { path, source } => {
                write!(f, "source unavailable: {}: {}", path, source)
            }
            FlowTagError::MalformedRow { line, reason } => {
                write!(f, "malformed lookup row at line {}: {}", line, reason)
            }
            FlowTagError::MalformedRecord { line, reason } => {
                write!(f, "malformed flow record at line {}: {}", line, reason)
            }
            FlowTagError::DestinationUnavailable { path, source } => {
                write!(f, "destination unavailable: {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FlowTagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlowTagError::SourceUnavailable { source, .. } => Some(source),
            FlowTagError::DestinationUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
