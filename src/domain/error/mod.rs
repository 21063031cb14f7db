use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("record type has {expected} fields but {found} values were given")]
    ArityMismatch { expected: usize, found: usize },
    #[error("field `{name}` appears more than once in the record type")]
    DuplicateField { name: String },
    #[error("record type has no field named `{name}`")]
    UnknownField { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
