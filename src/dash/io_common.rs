use criteria_tree::Cell;

/// A text cell. Blank text counts as a missing value.
pub fn text_cell(s: &str) -> Cell {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A cell from a workbook, rendered as text.
pub fn calamine_cell(cell: &calamine::DataType) -> Cell {
    match cell {
        calamine::DataType::String(s) => text_cell(s),
        // Whole numbers are written without the decimal part.
        calamine::DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            Some(format!("{}", *f as i64))
        }
        calamine::DataType::Float(f) => Some(f.to_string()),
        calamine::DataType::Int(i) => Some(i.to_string()),
        calamine::DataType::Bool(b) => Some(b.to_string()),
        calamine::DataType::DateTime(f) => Some(f.to_string()),
        // Empty and error cells.
        _ => None,
    }
}

/// The name of a column. Unnamed columns get a positional name.
pub fn header_name(cell: Cell, idx: usize) -> String {
    match cell {
        Some(s) => s,
        None => format!("column {}", idx + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::DataType;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(text_cell(""), None);
        assert_eq!(text_cell(" \t"), None);
        assert_eq!(text_cell(" a "), Some(" a ".to_string()));
    }

    #[test]
    fn workbook_cells() {
        assert_eq!(calamine_cell(&DataType::Float(3.0)), Some("3".to_string()));
        assert_eq!(calamine_cell(&DataType::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(calamine_cell(&DataType::Int(-4)), Some("-4".to_string()));
        assert_eq!(calamine_cell(&DataType::Bool(true)), Some("true".to_string()));
        assert_eq!(calamine_cell(&DataType::Empty), None);
        assert_eq!(
            calamine_cell(&DataType::String("  ".to_string())),
            None
        );
    }

    #[test]
    fn unnamed_headers() {
        assert_eq!(header_name(None, 2), "column 3");
        assert_eq!(header_name(Some("Impact".to_string()), 0), "Impact");
    }
}
