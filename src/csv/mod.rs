use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    domain::{field::FieldName, schema::Schema, table::Table},
    error::{Error, Result},
};

const DIRECTIVE: &str = "sep=";
const BOM: char = '\u{feff}';

/// How delimited text is split into cells.
///
/// A `sep=` directive on the first line of the input always wins over
/// [`ReadOptions::with_delimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    delimiter: u8,
    trim: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delimiter used when the input has no directive line.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Trim whitespace around header and data cells.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Load a [`Table`] of `f64` records from a reader with default options.
pub fn read(reader: impl Read) -> Result<Table> {
    read_with(reader, &ReadOptions::default())
}

pub fn read_with(reader: impl Read, options: &ReadOptions) -> Result<Table> {
    read_as(reader, options)
}

/// Open, fully read and close `path`, then parse it.
#[instrument(level = "info", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn read_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    let table = read_with(file, options)?;
    info!(records = table.len(), fields = table.schema().len(), "loaded");
    Ok(table)
}

/// Load records whose values are any type parsed from a cell with
/// [`FromStr`].
///
/// The whole input is consumed before parsing starts. The first bad line
/// aborts the load, so a caller either gets every record or an error naming
/// the row (and column) at fault.
pub fn read_as<T: FromStr>(mut reader: impl Read, options: &ReadOptions) -> Result<Table<T>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text, options)
}

/// Write `table` back out: a header of sanitized names, then one line per
/// record. No directive line is written.
pub fn write<T: Serialize>(table: &Table<T>, writer: impl Write) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(table.schema().names().iter().map(FieldName::as_str))?;
    for record in table {
        writer.serialize(record.values())?;
    }

    writer.flush()?;
    Ok(())
}

fn parse<T: FromStr>(text: &str, options: &ReadOptions) -> Result<Table<T>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let (directive, body) = split_directive(text)?;
    let line_offset = u64::from(directive.is_some());
    let delimiter = directive.unwrap_or(options.delimiter);

    if body.lines().next().map_or(true, |line| line.trim().is_empty()) {
        return Err(Error::MalformedHeader);
    }

    // An unterminated quote on the last row is closed at end of input by the
    // csv reader rather than rejected.
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut lines = reader.records();

    let header = lines.next().ok_or(Error::MalformedHeader)??;
    if header.iter().all(|cell| cell.trim().is_empty()) {
        return Err(Error::MalformedHeader);
    }

    let mut table = Table::new(Schema::from_header(header.iter())?);
    debug!(
        delimiter = %char::from(delimiter),
        fields = table.schema().len(),
        "parsed header"
    );

    let mut row = 0;
    for cells in lines {
        let cells = cells?;
        if is_blank(&cells) {
            continue;
        }
        row += 1;

        let start = cells.position().map_or(0, |position| position.byte());
        let line = line_at(body, start) + line_offset;
        let values = parse_row(&cells, table.schema(), row, line)?;
        table.push_row(values)?;
    }

    debug!(rows = row, "parsed rows");
    Ok(table)
}

/// Split off a leading `sep=<char>` line, returning the declared delimiter
/// and the rest of the text.
fn split_directive(text: &str) -> Result<(Option<u8>, &str)> {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let first = first.strip_suffix('\r').unwrap_or(first);

    let Some(declared) = first.strip_prefix(DIRECTIVE) else {
        return Ok((None, text));
    };

    match declared.as_bytes() {
        [delimiter] if delimiter.is_ascii() && *delimiter != b'"' => Ok((Some(*delimiter), rest)),
        _ => Err(Error::InvalidDirective {
            line: first.to_string(),
        }),
    }
}

/// 1-based line of `body` on which the record read from byte `start` begins.
///
/// The csv reader skips empty lines without counting them, and a record's
/// position points at the first of those skipped line breaks.
fn line_at(body: &str, start: u64) -> u64 {
    let bytes = body.as_bytes();
    let mut start = usize::try_from(start).map_or(bytes.len(), |start| start.min(bytes.len()));
    while matches!(bytes.get(start), Some(b'\n' | b'\r')) {
        start += 1;
    }

    let breaks = bytes[..start].iter().filter(|&&byte| byte == b'\n').count();
    breaks as u64 + 1
}

/// A line of nothing but whitespace reaches us as one empty cell.
fn is_blank(cells: &StringRecord) -> bool {
    cells.len() == 1 && cells[0].trim().is_empty()
}

fn parse_row<T: FromStr>(
    cells: &StringRecord,
    schema: &Schema,
    row: usize,
    line: u64,
) -> Result<Vec<T>> {
    if cells.len() != schema.len() {
        return Err(Error::RowWidth {
            row,
            line,
            expected: schema.len(),
            found: cells.len(),
        });
    }

    cells
        .iter()
        .zip(schema.names())
        .enumerate()
        .map(|(index, (cell, name))| {
            cell.parse().map_err(|_| Error::InvalidNumber {
                row,
                line,
                column: index + 1,
                name: name.to_string(),
                value: cell.to_string(),
            })
        })
        .collect()
}
