//! CSV reading and decoding helpers for the ridership source file.
//!
//! The source format is fixed: semicolon-separated fields, UTF-8 text, one
//! header row. Fields are read as raw bytes and decoded strictly so an
//! encoding mismatch surfaces as an error instead of replacement characters.
//! Records may be shorter than the header; the loader decides what to do with
//! longer ones.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use encoding_rs::{Encoding, UTF_8};

use crate::error::{LoadError, ParseFailure};

pub const SOURCE_DELIMITER: u8 = b';';

const BYTE_ORDER_MARK: char = '\u{feff}';

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path) -> Result<csv::Reader<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|source| ParseFailure::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(open_csv_reader(BufReader::new(file), SOURCE_DELIMITER))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String, LoadError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(ParseFailure::Decode {
            encoding: encoding.name(),
        }
        .into())
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
) -> Result<Vec<String>, LoadError> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Reads and decodes the header row, dropping a leading byte-order mark.
pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>, LoadError>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    let mut decoded = decode_record(&headers, encoding)?;
    if let Some(first) = decoded.first_mut()
        && let Some(stripped) = first.strip_prefix(BYTE_ORDER_MARK)
    {
        *first = stripped.to_string();
    }
    Ok(decoded)
}
