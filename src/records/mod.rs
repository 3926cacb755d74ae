pub mod flow_record;
pub mod lookup_record;

/// Whether `value` is a destination port as written in the inputs: one or more ASCII digits.
///
/// Ports stay text so that `"080"` and `"80"` remain distinct keys.
pub fn is_port_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
