use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read delimited file")]
    FileError(#[from] std::io::Error),
    #[error("could not split delimited text into rows")]
    CsvError(#[from] csv::Error),
    #[error("invalid delimiter directive `{line}`: expected `sep=` followed by one ASCII character")]
    InvalidDirective { line: String },
    #[error("header line is missing or empty")]
    MalformedHeader,
    #[error("row {row} (line {line}) has {found} cells but the header has {expected}")]
    RowWidth {
        row: usize,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("row {row} (line {line}), column {column} (`{name}`): `{value}` is not a number")]
    InvalidNumber {
        row: usize,
        line: u64,
        column: usize,
        name: String,
        value: String,
    },
    #[error(transparent)]
    Record(#[from] crate::domain::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
