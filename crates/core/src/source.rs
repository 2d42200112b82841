//! Row addressing over the original source CSV.
//!
//! Annotation state is stored per row index only; the source text itself is
//! never persisted in the database. Every view that needs text re-parses the
//! decoded source file through these helpers, keyed by the 1-based position
//! of each data row (header excluded). Parsing is CSV-correct: newlines
//! inside quoted fields do not split rows, so row indices stay aligned with
//! what ingestion counted.

use std::collections::HashMap;
use std::io::Cursor;

use crate::error::CoreError;

/// Header name of the designated text column joined into the annotation UI.
pub const TEXT_COLUMN: &str = "text";

/// Value joined for every row when the source header has no text column.
pub const MISSING_TEXT_COLUMN: &str = "<text column missing>";

fn reader(text: &str) -> csv::Reader<Cursor<Vec<u8>>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(text.as_bytes().to_vec()))
}

fn csv_err(e: csv::Error) -> CoreError {
    CoreError::Internal(format!("CSV parse error: {e}"))
}

/// Count the data rows of the source text, excluding the header.
pub fn data_row_count(text: &str) -> Result<usize, CoreError> {
    let mut rdr = reader(text);
    let mut count = 0;
    for record in rdr.records() {
        record.map_err(csv_err)?;
        count += 1;
    }
    Ok(count)
}

/// Return the header fields of the source text, in file order.
pub fn header_fields(text: &str) -> Result<Vec<String>, CoreError> {
    let mut rdr = reader(text);
    let headers = rdr.headers().map_err(csv_err)?;
    Ok(headers.iter().map(str::to_string).collect())
}

/// Build the row-index -> source-text map for the designated text column.
///
/// Keys are 1-based data-row indices matching ingestion order. When the
/// header has no [`TEXT_COLUMN`] field, every row maps to
/// [`MISSING_TEXT_COLUMN`] instead of the lookup failing.
pub fn text_column_by_row(text: &str) -> Result<HashMap<usize, String>, CoreError> {
    let mut rdr = reader(text);
    let text_pos = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h == TEXT_COLUMN);

    let mut by_row = HashMap::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let value = match text_pos {
            Some(pos) => record.get(pos).unwrap_or("").to_string(),
            None => MISSING_TEXT_COLUMN.to_string(),
        };
        by_row.insert(idx + 1, value);
    }
    Ok(by_row)
}

/// Lazy generator for the annotated re-export of a source CSV.
///
/// Yields one self-contained chunk per line: first the original header with
/// `annotation` and `date` appended, then each data row in file order with
/// the stored annotation content and validation date (empty strings for
/// un-annotated rows). Only one row is buffered at a time; dropping the
/// iterator mid-way abandons the remaining rows without further work.
pub struct CsvExport {
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    /// Output header, pending until the first `next()` call.
    header: Option<csv::StringRecord>,
    /// 1-based row index -> (annotation content, validation date).
    annotations: HashMap<usize, (String, String)>,
    next_index: usize,
}

impl CsvExport {
    pub fn new(
        text: &str,
        annotations: HashMap<usize, (String, String)>,
    ) -> Result<Self, CoreError> {
        let mut rdr = reader(text);
        let mut header = rdr.headers().map_err(csv_err)?.clone();
        header.push_field("annotation");
        header.push_field("date");

        Ok(Self {
            records: rdr.into_records(),
            header: Some(header),
            annotations,
            next_index: 0,
        })
    }

    fn encode(record: &csv::StringRecord) -> Result<String, CoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(record).map_err(csv_err)?;
        let buf = writer
            .into_inner()
            .map_err(|e| CoreError::Internal(format!("CSV flush error: {e}")))?;
        String::from_utf8(buf).map_err(|e| CoreError::Internal(e.to_string()))
    }
}

impl Iterator for CsvExport {
    type Item = Result<String, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(header) = self.header.take() {
            return Some(Self::encode(&header));
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(csv_err(e))),
        };

        self.next_index += 1;
        let (content, date) = self
            .annotations
            .get(&self.next_index)
            .cloned()
            .unwrap_or_default();

        let mut out = record;
        out.push_field(&content);
        out.push_field(&date);
        Some(Self::encode(&out))
    }
}
