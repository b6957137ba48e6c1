// Primitives for reading delimited text.

use crate::dash::io_common::{header_name, text_cell};
use crate::dash::*;

/// Decodes delimited text. The first record holds the column names.
///
/// Records shorter than the header are padded with missing values, longer ones
/// are cut to the width of the header.
pub fn read_delimited_table(bytes: &[u8], delimiter: u8) -> BDashResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header = rdr
        .headers()
        .context(CsvParseSnafu {
            delimiter: delimiter as char,
        })?
        .clone();
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, h)| header_name(text_cell(h), idx))
        .collect();
    if columns.is_empty() {
        return Err(Box::new(DashError::EmptyInput {}));
    }
    debug!("read_delimited_table: {:?} header: {:?}", delimiter as char, columns);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let record = record_r.context(CsvParseSnafu {
            delimiter: delimiter as char,
        })?;
        if record.len() > columns.len() {
            debug!(
                "read_delimited_table: line {}: {} fields for {} columns",
                idx + 2,
                record.len(),
                columns.len()
            );
        }
        rows.push(record.iter().map(text_cell).collect());
    }
    Ok(RawTable::new(columns, rows))
}
