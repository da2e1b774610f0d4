use std::io::{self, Write};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::GenError;
use crate::record::{Record, HEADER};

/// Writes the header line and one line per record. The header is written even for an empty
/// table.
///
/// # Errors
/// Errors if a record cannot be serialized or the underlying writer fails.
pub fn write_csv<W: Write>(writer: W, rows: &[Record]) -> Result<W, GenError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| GenError::IoError(io::Error::new(e.error().kind(), e.to_string())))
}

/// Serializes the table into an in-memory UTF-8 buffer.
///
/// # Errors
/// Errors if a record cannot be serialized.
pub fn to_csv_bytes(rows: &[Record]) -> Result<Vec<u8>, GenError> {
    write_csv(Vec::new(), rows)
}
