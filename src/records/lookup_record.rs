use serde::Deserialize;

use super::is_port_number;
use crate::error::FlowTagError;

/// A raw lookup table row, before validation.
#[derive(Debug, Deserialize)]
pub struct LookupRecord {
    #[serde(rename = "dstport")]
    pub dst_port: String,
    pub protocol: String,
    pub tag: String,
}

/// A validated `(port, protocol) -> tag` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRule {
    pub port: String,
    /// Always lowercase.
    pub protocol: String,
    pub tag: String,
}

impl LookupRecord {
    /// Trims every field, lowercases the protocol and checks that the port is numeric
    /// and that neither protocol nor tag is empty.
    pub fn validate(self, line: u64) -> Result<LookupRule, FlowTagError> {
        let port = self.dst_port.trim();
        let protocol = self.protocol.trim().to_lowercase();
        let tag = self.tag.trim();

        if !is_port_number(port) || protocol.is_empty() || tag.is_empty() {
            return Err(FlowTagError::MalformedRow {
                line,
                reason: format!(
                    "dstport='{}', protocol='{}', tag='{}'",
                    self.dst_port, self.protocol, self.tag
                ),
            });
        }

        Ok(LookupRule {
            port: port.to_string(),
            protocol,
            tag: tag.to_string(),
        })
    }
}
