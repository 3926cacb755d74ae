use std::{collections::HashMap, fs::File, io::Read};

use log::debug;

use crate::{
    diagnostics::DiagnosticSink,
    error::FlowTagError,
    parsers::{
        csv_parser::CsvParser,
        parser::{Parser, ReadError},
    },
    records::lookup_record::{LookupRecord, LookupRule},
};

/// Tag applied to flows that match no lookup rule.
pub const UNTAGGED: &str = "Untagged";

const LOOKUP_COLUMNS: [&str; 3] = ["dstport", "protocol", "tag"];

/// Tag rules indexed by protocol name, then destination port.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupTable {
    rules: HashMap<String, HashMap<String, Vec<String>>>, // protocol -> port -> tags
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the rule's tag to its `(port, protocol)` entry. Earlier tags are kept.
    pub fn insert(&mut self, rule: LookupRule) {
        self.rules
            .entry(rule.protocol)
            .or_default()
            .entry(rule.port)
            .or_default()
            .push(rule.tag);
    }

    /// The tags stored for `(port, protocol)`, in insertion order.
    pub fn get(&self, port: &str, protocol: &str) -> Option<&[String]> {
        self.rules
            .get(protocol)
            .and_then(|ports| ports.get(port))
            .map(Vec::as_slice)
    }

    /// The tags that classify a flow to `(port, protocol)`, or `[UNTAGGED]` if none do.
    pub fn lookup_tags(&self, port: &str, protocol: &str) -> Vec<&str> {
        match self.get(port, protocol) {
            Some(tags) => tags.iter().map(String::as_str).collect(),
            None => vec![UNTAGGED],
        }
    }

    /// Number of stored tags across all entries.
    pub fn len(&self) -> usize {
        self.rules
            .values()
            .flat_map(|ports| ports.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds a table from CSV rows with a `dstport,protocol,tag` header.
    ///
    /// Invalid rows are reported and skipped. A header without one of the three
    /// columns is a read failure.
    pub fn from_reader<R>(reader: R, sink: &dyn DiagnosticSink) -> Result<Self, ReadError>
    where
        R: Read + 'static,
    {
        let mut table = LookupTable::new();
        let mut skipped = 0usize;

        for (line, row) in CsvParser.parse::<LookupRecord, R>(reader, &LOOKUP_COLUMNS)? {
            let rule = match row {
                Ok(record) => record.validate(line),
                Err(ReadError::Csv(err)) if err.is_io_error() => return Err(ReadError::Csv(err)),
                Err(err) => Err(FlowTagError::MalformedRow {
                    line,
                    reason: err.to_string(),
                }),
            };

            match rule {
                Ok(rule) => {
                    debug!("Adding lookup rule: {:?}", rule);
                    table.insert(rule);
                }
                Err(err) => {
                    skipped += 1;
                    sink.warning(&format!("Skipping invalid entry in lookup table: {}", err));
                }
            }
        }

        sink.info(&format!(
            "Lookup table holds {} tag(s); {} row(s) skipped",
            table.len(),
            skipped
        ));
        Ok(table)
    }
}

/// Loads the lookup table at `path`.
///
/// An unreadable file yields an empty table; the failure is reported to `sink` and the
/// run carries on.
pub fn load_lookup_table(path: &str, sink: &dyn DiagnosticSink) -> LookupTable {
    debug!("Opening the lookup table: {:?} ...", path);

    let result = File::open(path)
        .map_err(ReadError::Io)
        .and_then(|file| LookupTable::from_reader(file, sink));

    match result {
        Ok(table) => {
            sink.info(&format!("Loaded lookup table from {}", path));
            if table.is_empty() {
                sink.warning("Lookup table has no rules; every flow will be Untagged");
            }
            table
        }
        Err(source) => {
            let err = FlowTagError::SourceUnavailable {
                path: path.to_string(),
                source,
            };
            sink.error(&format!("Error reading lookup table: {}", err));
            LookupTable::new()
        }
    }
}
