use std::{
    fs::File,
    io::{BufWriter, Write},
};

use log::debug;

use crate::{
    args::ExportMethodType,
    classifier::{FlowCounts, PortProtocolCounts, TagCounts},
    diagnostics::DiagnosticSink,
    error::FlowTagError,
    lookup_table::UNTAGGED,
};

/// Tags listed first in the tag section, in this order.
pub const PRIORITY_TAGS: [&str; 4] = ["sv_P2", "sv_P1", "sv_P4", "email"];

/// Ports listed first in the port/protocol section, in this order.
pub const COMMON_PORTS: [&str; 10] = [
    "22", "23", "25", "110", "143", "443", "993", "1024", "49158", "80",
];

/// Protocols reported for each common port, in this order. A common port seen with any
/// other protocol is left out of the report.
pub const COMMON_PORT_PROTOCOLS: [&str; 3] = ["tcp", "udp", "icmp"];

/// Renders both sections of the report.
pub fn render(counts: &FlowCounts) -> String {
    let mut document = String::new();
    render_tag_counts(&mut document, &counts.tag_counts);
    document.push('\n');
    render_port_protocol_counts(&mut document, &counts.port_protocol_counts);
    document
}

fn render_tag_counts(document: &mut String, tag_counts: &TagCounts) {
    document.push_str("Tag Counts:\n");
    document.push_str("Tag,Count\n");

    for tag in PRIORITY_TAGS {
        if let Some(count) = tag_counts.get(tag) {
            push_row(document, &[tag], *count);
        }
    }

    let mut remaining: Vec<(&String, &u64)> = tag_counts
        .iter()
        .filter(|(tag, _)| !PRIORITY_TAGS.contains(&tag.as_str()) && tag.as_str() != UNTAGGED)
        .collect();
    remaining.sort();
    for (tag, count) in remaining {
        push_row(document, &[tag.as_str()], *count);
    }

    if let Some(count) = tag_counts.get(UNTAGGED) {
        push_row(document, &[UNTAGGED], *count);
    }
}

fn render_port_protocol_counts(document: &mut String, port_protocol_counts: &PortProtocolCounts) {
    document.push_str("Port/Protocol Combination Counts:\n");
    document.push_str("Port,Protocol,Count\n");

    for port in COMMON_PORTS {
        for protocol in COMMON_PORT_PROTOCOLS {
            let key = (port.to_string(), protocol.to_string());
            if let Some(count) = port_protocol_counts.get(&key) {
                push_row(document, &[port, protocol], *count);
            }
        }
    }

    // Ports compare as text here, so "9" lands after "80".
    let mut remaining: Vec<(&(String, String), &u64)> = port_protocol_counts
        .iter()
        .filter(|((port, _), _)| !COMMON_PORTS.contains(&port.as_str()))
        .collect();
    remaining.sort();
    for ((port, protocol), count) in remaining {
        push_row(document, &[port.as_str(), protocol.as_str()], *count);
    }
}

fn push_row(document: &mut String, fields: &[&str], count: u64) {
    document.push_str(&format!("{},{}\n", fields.join(","), count));
}

/// Writes a rendered report to stdout or to a file.
pub struct OutputWriter {
    destination: String,
    writer: BufWriter<Box<dyn Write>>,
}

impl OutputWriter {
    /// Opens the destination. For a file this creates or truncates it.
    pub fn new(
        export_type: ExportMethodType,
        file_path: &str,
    ) -> Result<Self, FlowTagError> {
        let (destination, writer): (String, Box<dyn Write>) = match export_type {
            ExportMethodType::File => {
                let file = File::create(file_path).map_err(|source| {
                    FlowTagError::DestinationUnavailable {
                        path: file_path.to_string(),
                        source,
                    }
                })?;
                (file_path.to_string(), Box::new(file))
            }
            ExportMethodType::Print => ("stdout".to_string(), Box::new(std::io::stdout())),
        };

        Ok(OutputWriter {
            destination,
            writer: BufWriter::new(writer),
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Writes the whole document and flushes it.
    pub fn write_report(&mut self, document: &str) -> Result<(), FlowTagError> {
        debug!("Writing report to {}", self.destination);
        self.writer
            .write_all(document.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| FlowTagError::DestinationUnavailable {
                path: self.destination.clone(),
                source,
            })
    }
}

/// Renders `counts` and writes the report.
///
/// Returns `false` if the destination could not be opened or written; the failure has
/// then been reported to `sink`.
pub fn write_output(
    export_type: ExportMethodType,
    file_path: &str,
    counts: &FlowCounts,
    sink: &dyn DiagnosticSink,
) -> bool {
    let document = render(counts);

    let result = OutputWriter::new(export_type, file_path).and_then(|mut writer| {
        writer.write_report(&document)?;
        Ok(writer.destination().to_string())
    });

    match result {
        Ok(destination) => {
            sink.info(&format!("Results written to {}", destination));
            true
        }
        Err(err) => {
            sink.error(&format!("Error writing output file: {}", err));
            false
        }
    }
}
