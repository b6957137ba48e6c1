use log::{debug, warn};

use crate::config::*;

/// Renames the first four columns to the canonical schema.
///
/// The headers are trimmed first. Tables with fewer than four columns are
/// passed through with trimmed headers only. Cell values are never touched.
pub fn normalize(table: RawTable) -> CanonicalTable {
    let RawTable { columns, rows } = table;
    let mut columns: Vec<String> = columns.iter().map(|c| c.trim().to_string()).collect();

    if columns.len() < CANONICAL_COLUMNS.len() {
        warn!(
            "normalize: only {} columns found, leaving headers as is: {:?}",
            columns.len(),
            columns
        );
        return CanonicalTable {
            table: RawTable { columns, rows },
        };
    }

    debug!(
        "normalize: renaming {:?} to {:?}",
        &columns[..CANONICAL_COLUMNS.len()],
        CANONICAL_COLUMNS
    );
    for (col, name) in columns.iter_mut().zip(CANONICAL_COLUMNS) {
        *col = name.to_string();
    }

    // Lookups resolve to the first column with a given name, so a later
    // column carrying a canonical name is shadowed by the renamed one.
    let shadowed: Vec<&String> = columns[CANONICAL_COLUMNS.len()..]
        .iter()
        .filter(|c| CANONICAL_COLUMNS.contains(&c.as_str()))
        .collect();
    if !shadowed.is_empty() {
        warn!(
            "normalize: extra columns reuse canonical names and will be ignored: {:?}",
            shadowed
        );
    }

    CanonicalTable {
        table: RawTable { columns, rows },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cols: &[&str]) -> RawTable {
        RawTable::new(
            cols.iter().map(|s| s.to_string()).collect(),
            vec![cols.iter().map(|s| Some(format!("v-{}", s))).collect()],
        )
    }

    #[test]
    fn renames_the_first_four_columns() {
        let ct = normalize(table(&["Impacts", "Catégorie", "Nom", "Détail"]));
        assert_eq!(ct.columns(), &CANONICAL_COLUMNS.map(String::from));
        // Values are untouched.
        assert_eq!(ct.table().get(0, CRITERION_COLUMN), Some("v-Nom"));
    }

    #[test]
    fn keeps_extra_columns_in_place() {
        let ct = normalize(table(&["a", "b", "c", "d", "Source", "Poids"]));
        assert_eq!(
            ct.columns(),
            &["impact", "type", "critère", "description", "Source", "Poids"]
        );
        assert_eq!(ct.table().get(0, "Poids"), Some("v-Poids"));
    }

    #[test]
    fn trims_headers() {
        let ct = normalize(table(&[" a ", "b", "c", "d", "  Source\t"]));
        assert_eq!(ct.columns()[4], "Source");
    }

    #[test]
    fn narrow_tables_pass_through() {
        let ct = normalize(table(&["impact", " type "]));
        assert_eq!(ct.columns(), &["impact", "type"]);
        assert_eq!(ct.table().num_rows(), 1);
    }

    #[test]
    fn shadowed_description_resolves_to_fourth_column() {
        let ct = normalize(table(&["a", "b", "c", "d", "description"]));
        assert_eq!(ct.table().get(0, DESCRIPTION_COLUMN), Some("v-d"));
    }
}
