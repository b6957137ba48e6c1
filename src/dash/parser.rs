// Decoding of the criteria file when its format is not known in advance.

use serde::Serialize;

use crate::dash::io_csv::read_delimited_table;
use crate::dash::io_xlsx::read_xlsx_table;
use crate::dash::*;

/// The formats that are tried, in this order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub enum SourceFormat {
    #[serde(rename = "xlsx")]
    Xlsx,
    #[serde(rename = "csv")]
    CsvComma,
    #[serde(rename = "csv-semicolon")]
    CsvSemicolon,
}

pub const FORMAT_CHAIN: [SourceFormat; 3] = [
    SourceFormat::Xlsx,
    SourceFormat::CsvComma,
    SourceFormat::CsvSemicolon,
];

impl SourceFormat {
    fn decode(&self, bytes: &[u8]) -> BDashResult<RawTable> {
        match self {
            SourceFormat::Xlsx => read_xlsx_table(bytes),
            SourceFormat::CsvComma => read_delimited_table(bytes, b','),
            SourceFormat::CsvSemicolon => read_delimited_table(bytes, b';'),
        }
    }

    // Only the comma attempt gives way to the next one when it finds too few columns.
    fn requires_full_width(&self) -> bool {
        matches!(self, SourceFormat::CsvComma)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AttemptOutcome {
    Decoded { columns: usize, rows: usize },
    TooFewColumns { columns: usize },
    Failed { message: String },
}

/// What happened when trying one format.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseAttempt {
    pub format: SourceFormat,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub table: CanonicalTable,
    pub format: SourceFormat,
    pub attempts: Vec<ParseAttempt>,
}

/// Tries every format of [`FORMAT_CHAIN`] and normalizes the first table
/// that decodes.
///
/// A comma-separated decoding with fewer than four columns is not accepted
/// right away: the semicolon is tried next, and the wider of the two tables is
/// kept. If no format decodes, the error carries the message of the last
/// attempt along with all the attempts.
pub fn parse(bytes: &[u8]) -> DashResult<ParsedTable> {
    let mut attempts: Vec<ParseAttempt> = Vec::new();
    let mut narrow: Option<(RawTable, SourceFormat)> = None;
    let mut last_error: String = "no format to try".to_string();

    for format in FORMAT_CHAIN {
        match format.decode(bytes) {
            Ok(table)
                if format.requires_full_width()
                    && table.num_columns() < CANONICAL_COLUMNS.len() =>
            {
                debug!(
                    "parse: {:?} found only {} columns",
                    format,
                    table.num_columns()
                );
                attempts.push(ParseAttempt {
                    format,
                    outcome: AttemptOutcome::TooFewColumns {
                        columns: table.num_columns(),
                    },
                });
                narrow = Some((table, format));
            }
            Ok(table) => {
                attempts.push(ParseAttempt {
                    format,
                    outcome: AttemptOutcome::Decoded {
                        columns: table.num_columns(),
                        rows: table.num_rows(),
                    },
                });
                let (table, format) = match narrow.take() {
                    Some((n, nf)) if n.num_columns() >= table.num_columns() => (n, nf),
                    _ => (table, format),
                };
                return Ok(finish(table, format, attempts));
            }
            Err(e) => {
                debug!("parse: {:?} failed: {}", format, e);
                last_error = e.to_string();
                attempts.push(ParseAttempt {
                    format,
                    outcome: AttemptOutcome::Failed {
                        message: last_error.clone(),
                    },
                });
            }
        }
    }

    if let Some((table, format)) = narrow {
        return Ok(finish(table, format, attempts));
    }
    warn!("parse: no format could decode the file: {:?}", attempts);
    Err(DashError::ParseFailure {
        message: last_error,
        attempts,
    })
}

fn finish(table: RawTable, format: SourceFormat, attempts: Vec<ParseAttempt>) -> ParsedTable {
    info!(
        "parse: decoded as {:?}: {} columns, {} rows",
        format,
        table.num_columns(),
        table.num_rows()
    );
    ParsedTable {
        table: normalize(table),
        format,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_is_tried_first() {
        let p = parse(include_bytes!("../../test_data/criteres.xlsx")).unwrap();
        assert_eq!(p.format, SourceFormat::Xlsx);
        assert_eq!(
            p.attempts,
            vec![ParseAttempt {
                format: SourceFormat::Xlsx,
                outcome: AttemptOutcome::Decoded {
                    columns: 5,
                    rows: 3
                },
            }]
        );
        assert_eq!(
            p.table.columns(),
            &["impact", "type", "critère", "description", "Poids"]
        );
        let records = build(&p.table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].criterion, "Confort d'été");
        assert_eq!(records[1].description, NO_DESCRIPTION);
    }

    #[test]
    fn comma_file() {
        let p = parse("Impact,Type,Critère,Description\nA,T1,C1,D1\n".as_bytes()).unwrap();
        assert_eq!(p.format, SourceFormat::CsvComma);
        assert_eq!(p.table.columns(), &CANONICAL_COLUMNS);
        assert_eq!(p.attempts.len(), 2);
        assert!(matches!(
            p.attempts[0],
            ParseAttempt {
                format: SourceFormat::Xlsx,
                outcome: AttemptOutcome::Failed { .. }
            }
        ));
        assert_eq!(
            p.attempts[1].outcome,
            AttemptOutcome::Decoded {
                columns: 4,
                rows: 1
            }
        );
    }

    #[test]
    fn semicolon_file() {
        let p = parse(
            "Impact;Type;Critère;Description\nEnvironnement;Climat;Empreinte carbone;en kg, CO2e\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(p.format, SourceFormat::CsvSemicolon);
        assert_eq!(
            p.attempts[1].outcome,
            AttemptOutcome::TooFewColumns { columns: 1 }
        );
        assert_eq!(p.table.table().get(0, DESCRIPTION_COLUMN), Some("en kg, CO2e"));
    }

    #[test]
    fn narrow_comma_file_is_kept() {
        let p = parse(b"impact,type\nA,B\n").unwrap();
        assert_eq!(p.format, SourceFormat::CsvComma);
        assert_eq!(p.table.columns(), &["impact", "type"]);
        assert_eq!(p.attempts.len(), 3);
    }

    #[test]
    fn extra_columns_are_kept() {
        let p = parse(b"a,b,c,d,Source\n1,2,3,4,5\n").unwrap();
        assert_eq!(
            p.table.columns(),
            &["impact", "type", "critère", "description", "Source"]
        );
    }

    #[test]
    fn nothing_decodes() {
        match parse(&[0xff, 0xfe, 0x00, 0x81, b',', b';']) {
            Err(DashError::ParseFailure { message, attempts }) => {
                assert!(!message.is_empty());
                assert_eq!(attempts.len(), 3);
                assert_eq!(attempts[2].format, SourceFormat::CsvSemicolon);
                assert!(attempts
                    .iter()
                    .all(|a| matches!(a.outcome, AttemptOutcome::Failed { .. })));
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn empty_file() {
        assert!(matches!(parse(b""), Err(DashError::ParseFailure { .. })));
    }
}
