use super::is_port_number;
use crate::{error::FlowTagError, protocol};

/// Token index of the destination port in a flow log line.
pub const DST_PORT_INDEX: usize = 5;
/// Token index of the IANA protocol number in a flow log line.
pub const PROTOCOL_INDEX: usize = 7;

/// The two fields of a flow log line that drive classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    pub dst_port: String,
    pub protocol_number: String,
}

impl FlowRecord {
    pub fn from_line(line: &str, line_number: u64) -> Result<Self, FlowTagError> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let (Some(dst_port), Some(protocol_number)) =
            (fields.get(DST_PORT_INDEX), fields.get(PROTOCOL_INDEX))
        else {
            return Err(FlowTagError::MalformedRecord {
                line: line_number,
                reason: format!("'{}' (missing fields)", line.trim()),
            });
        };

        let dst_port = dst_port.trim();
        if !is_port_number(dst_port) {
            return Err(FlowTagError::MalformedRecord {
                line: line_number,
                reason: format!("invalid dstport '{}': '{}'", dst_port, line.trim()),
            });
        }

        Ok(FlowRecord {
            dst_port: dst_port.to_string(),
            protocol_number: protocol_number.trim().to_string(),
        })
    }

    /// The lowercase protocol name for this record, `"unknown"` if unmapped.
    pub fn protocol_name(&self) -> String {
        protocol::resolve(&self.protocol_number).to_lowercase()
    }
}
