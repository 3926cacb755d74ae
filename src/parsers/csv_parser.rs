use super::parser::{Parser, ReadError};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::io::Read;

/// Reads comma-delimited rows keyed by their header names.
///
/// Header names are trimmed and only the first occurrence of a repeated name is kept,
/// so `dstport, protocol ,tag` and `dstport,protocol,tag,tag` both deserialize cleanly.
/// Columns without a matching struct field are ignored.
pub struct CsvParser;

/// Trims header names and keeps only the first column of each name, returning the kept
/// headers and their source indices. A repeated `tag` column therefore never overrides
/// the one the file declares first.
fn preprocess_headers(headers: &StringRecord) -> (StringRecord, HashSet<usize>) {
    let mut unique_headers = StringRecord::new();
    let mut seen = HashSet::new();
    let mut indices = HashSet::new();

    for (index, header) in headers.iter().enumerate() {
        let trimmed_header = header.trim();
        if !seen.contains(trimmed_header) {
            unique_headers.push_field(trimmed_header);
            seen.insert(trimmed_header);
            indices.insert(index);
        }
    }

    (unique_headers, indices)
}

fn filter_record(record: &StringRecord, indices: &HashSet<usize>) -> StringRecord {
    let mut filtered = StringRecord::new();
    for (index, field) in record.iter().enumerate() {
        if indices.contains(&index) {
            filtered.push_field(field);
        }
    }
    filtered
}

impl Parser for CsvParser {
    /// Yields `(line, row)` pairs, where `line` is the 1-based line the row starts on.
    ///
    /// Fails up front if the header cannot be read or lacks one of `required`.
    fn parse<T, R>(
        &self,
        reader: R,
        required: &[&'static str],
    ) -> Result<Box<dyn Iterator<Item = (u64, Result<T, ReadError>)>>, ReadError>
    where
        T: DeserializeOwned + 'static,
        R: Read + 'static,
    {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let (unique_headers, indices) = preprocess_headers(&headers);

        // An empty source has no header row at all.
        if unique_headers.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        if let Some(missing) = required
            .iter()
            .find(|column| !unique_headers.iter().any(|header| header == **column))
        {
            return Err(ReadError::MissingColumn(*missing));
        }

        rdr.set_headers(unique_headers.clone());

        let iter = rdr.into_records().map(move |result| match result {
            Ok(record) => {
                let line = record.position().map_or(0, |position| position.line());
                let filtered_record = filter_record(&record, &indices);
                let row = filtered_record
                    .deserialize::<T>(Some(&unique_headers))
                    .map_err(ReadError::Csv);
                (line, row)
            }
            Err(err) => {
                let line = err.position().map_or(0, |position| position.line());
                (line, Err(ReadError::Csv(err)))
            }
        });

        Ok(Box::new(iter))
    }
}
