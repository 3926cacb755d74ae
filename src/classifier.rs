use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
};

use log::debug;

use crate::{
    diagnostics::DiagnosticSink,
    error::FlowTagError,
    lookup_table::LookupTable,
    parsers::{flow_log_parser::FlowLogParser, parser::ReadError},
    records::flow_record::FlowRecord,
};

/// Occurrences per tag, `Untagged` included.
pub type TagCounts = HashMap<String, u64>;

/// Occurrences per `(port, protocol)` pair.
pub type PortProtocolCounts = HashMap<(String, String), u64>;

/// Frequency tables produced by a classification pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlowCounts {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
}

impl FlowCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one classified record: every tag once, and its `(port, protocol)` pair once.
    pub fn record(&mut self, tags: &[&str], port: &str, protocol: &str) {
        for tag in tags {
            *self.tag_counts.entry(tag.to_string()).or_insert(0) += 1;
        }

        *self
            .port_protocol_counts
            .entry((port.to_string(), protocol.to_string()))
            .or_insert(0) += 1;
    }
}

/// Tags flow log records against a lookup table.
pub struct FlowClassifier<'a> {
    table: &'a LookupTable,
    sink: &'a dyn DiagnosticSink,
    counts: FlowCounts,
    classified: u64,
    skipped: u64,
}

impl<'a> FlowClassifier<'a> {
    pub fn new(table: &'a LookupTable, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            table,
            sink,
            counts: FlowCounts::new(),
            classified: 0,
            skipped: 0,
        }
    }

    /// Classifies a single flow log line. Malformed lines are reported and skipped.
    pub fn process_line(&mut self, line: &str, line_number: u64) {
        let record = match FlowRecord::from_line(line, line_number) {
            Ok(record) => record,
            Err(err) => {
                self.skipped += 1;
                self.sink.warning(&format!("Skipping {}", err));
                return;
            }
        };

        let protocol = record.protocol_name();
        let tags = self.table.lookup_tags(&record.dst_port, &protocol);
        debug!(
            "Line {}: {}/{} tagged {:?}",
            line_number, record.dst_port, protocol, tags
        );

        self.counts.record(&tags, &record.dst_port, &protocol);
        self.classified += 1;
    }

    /// Classifies every line of `reader` in order.
    ///
    /// A read error stops the pass; the counts gathered before it are kept.
    pub fn process_reader<R>(&mut self, reader: R) -> Result<(), ReadError>
    where
        R: BufRead,
    {
        for (line_number, line) in FlowLogParser.parse(reader) {
            let line = line?;
            self.process_line(&line, line_number);
        }
        Ok(())
    }

    pub fn finish(self) -> FlowCounts {
        self.sink.info(&format!(
            "Classified {} flow record(s); {} skipped",
            self.classified, self.skipped
        ));
        self.counts
    }
}

/// Classifies the flow log at `path`.
///
/// A file that cannot be opened yields empty counts. A read failure part way through
/// keeps what was counted so far. Both are reported to `sink`.
pub fn process_flow_log(path: &str, table: &LookupTable, sink: &dyn DiagnosticSink) -> FlowCounts {
    debug!("Opening the flow log: {:?} ...", path);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            let err = FlowTagError::SourceUnavailable {
                path: path.to_string(),
                source: ReadError::Io(err),
            };
            sink.error(&format!("Error processing flow log file: {}", err));
            return FlowCounts::new();
        }
    };

    let mut classifier = FlowClassifier::new(table, sink);
    match classifier.process_reader(BufReader::new(file)) {
        Ok(()) => sink.info(&format!("Processed flow log file: {}", path)),
        Err(source) => {
            let err = FlowTagError::SourceUnavailable {
                path: path.to_string(),
                source,
            };
            sink.error(&format!("Error processing flow log file: {}", err));
        }
    }
    classifier.finish()
}
