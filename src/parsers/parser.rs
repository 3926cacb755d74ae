use csv::Error as CsvError;
use serde::de::DeserializeOwned;
use std::{fmt, io};

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    Csv(CsvError),
    MissingColumn(&'static str),
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<CsvError> for ReadError {
    fn from(err: CsvError) -> Self {
        ReadError::Csv(err)
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "{}", err),
            ReadError::Csv(err) => write!(f, "{}", err),
            ReadError::MissingColumn(column) => write!(f, "missing column '{}'", column),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::Csv(err) => Some(err),
            ReadError::MissingColumn(_) => None,
        }
    }
}

/// A source of header-named rows.
pub trait Parser {
    fn parse<T, R>(
        &self,
        reader: R,
        required: &[&'static str],
    ) -> Result<Box<dyn Iterator<Item = (u64, Result<T, ReadError>)>>, ReadError>
    where
        T: DeserializeOwned + 'static,
        R: io::Read + 'static;
}
