// Reading the criteria from an Excel workbook held in memory.

use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::dash::io_common::{calamine_cell, header_name};
use crate::dash::*;

/// Decodes the first worksheet. The first row holds the column names.
pub fn read_xlsx_table(bytes: &[u8]) -> BDashResult<RawTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).context(OpeningExcelSnafu {})?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(OpeningExcelSnafu {})?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu {})?;
    debug!("read_xlsx_table: header: {:?}", header);
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, c)| header_name(calamine_cell(c), idx))
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_xlsx_table: idx: {:?} row: {:?}", idx, row);
        rows.push(row.iter().map(calamine_cell).collect());
    }
    Ok(RawTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &[u8] = include_bytes!("../../test_data/criteres.xlsx");

    #[test]
    fn first_sheet() {
        let t = read_xlsx_table(WORKBOOK).unwrap();
        assert_eq!(t.columns, vec!["Impact", "Type", "Critère", "Description", "Poids"]);
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.get(0, "Critère"), Some("Empreinte carbone des matériaux"));
        // Whole numbers come out as integers.
        assert_eq!(t.get(0, "Poids"), Some("3"));
        assert_eq!(t.get(1, "Description"), None);
        assert_eq!(t.get(2, "Impact"), None);
    }

    #[test]
    fn text_is_not_a_workbook() {
        let res = read_xlsx_table(b"impact,type,critere,description\nA,B,C,D\n");
        assert!(matches!(res.map_err(|e| *e), Err(DashError::OpeningExcel { .. })));
    }

    #[test]
    fn empty_input_is_not_a_workbook() {
        assert!(read_xlsx_table(&[]).is_err());
    }
}
