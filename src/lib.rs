//! Load delimited text into immutable records whose fields come from the
//! header row at runtime.
//!
//! ```
//! let table = dynrec::csv::read("sep=,\na,b\n1.0,2.0\n".as_bytes())?;
//! let record = &table.records()[0];
//!
//! assert_eq!(record["a"], 1.0);
//! assert_eq!(record.to_string(), "Record(a=1, b=2)");
//! # Ok::<(), dynrec::error::Error>(())
//! ```

pub mod csv;
pub mod domain;
pub mod error;
