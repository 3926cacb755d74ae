use std::io::{self, BufRead};

/// Reads a flow log one line at a time.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub struct FlowLogParser;

fn split_carriage_returns(segment: io::Result<Vec<u8>>) -> Vec<io::Result<String>> {
    let text = match segment.and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }) {
        Ok(text) => text,
        Err(err) => return vec![Err(err)],
    };

    let body = text.strip_suffix('\r').unwrap_or(&text);
    body.split('\r').map(|line| Ok(line.to_string())).collect()
}

impl FlowLogParser {
    /// Yields `(line, text)` pairs with 1-based line numbers.
    ///
    /// Iteration ends after the first read error, which is yielded as the last item.
    pub fn parse<R>(&self, reader: R) -> impl Iterator<Item = (u64, io::Result<String>)>
    where
        R: BufRead,
    {
        let mut failed = false;
        reader
            .split(b'\n')
            .flat_map(split_carriage_returns)
            .zip(1u64..)
            .map(|(line, line_number)| (line_number, line))
            .take_while(move |(_, line)| {
                let keep = !failed;
                failed |= line.is_err();
                keep
            })
    }
}
