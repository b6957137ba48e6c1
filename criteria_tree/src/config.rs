// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The canonical name of the first column: the top-level category.
pub const IMPACT_COLUMN: &str = "impact";
/// The canonical name of the second column.
pub const TYPE_COLUMN: &str = "type";
/// The canonical name of the third column: the leaf criterion.
pub const CRITERION_COLUMN: &str = "critère";
/// The canonical name of the fourth column.
pub const DESCRIPTION_COLUMN: &str = "description";

/// The canonical schema, by position.
pub const CANONICAL_COLUMNS: [&str; 4] = [
    IMPACT_COLUMN,
    TYPE_COLUMN,
    CRITERION_COLUMN,
    DESCRIPTION_COLUMN,
];

/// The columns that must be present and filled for a row to become a criterion.
pub const REQUIRED_COLUMNS: [&str; 3] = [IMPACT_COLUMN, TYPE_COLUMN, CRITERION_COLUMN];

/// The text used when a criterion comes without a description.
pub const NO_DESCRIPTION: &str = "no description available";

/// A raw cell. `None` stands for a null, NaN or empty cell.
pub type Cell = Option<String>;

/// A table as decoded from a source file, before any renaming.
///
/// The order of the columns is kept as found in the source. It only matters
/// for diagnostics: all the lookups are done by column name.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Creates a table. Every row is padded with null cells (or truncated) to
    /// the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> RawTable {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        RawTable { columns, rows }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The value of a cell, looked up by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

/// A table whose first four columns carry the canonical names.
///
/// It can only be obtained through [`crate::normalize`]. A source with fewer
/// than four columns still produces a `CanonicalTable` (unchanged), which is
/// then rejected by [`crate::check_schema`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CanonicalTable {
    pub(crate) table: RawTable,
}

impl CanonicalTable {
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }
}

// ******** Output data structures *********

/// One leaf of the hierarchy. All the fields are trimmed and never empty.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct CriterionRecord {
    pub impact: String,
    pub type_name: String,
    pub criterion: String,
    pub description: String,
}

/// A criterion, ready to be placed in a treemap.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TreeLeaf {
    pub record: CriterionRecord,
    /// The full path from the root, for instance `Exposcore / impact / type / criterion`.
    pub path: String,
    /// The criterion name, wrapped for display inside a rectangle.
    pub label: String,
    /// The text shown when hovering the rectangle.
    pub hover: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TypeNode {
    pub name: String,
    pub criteria: Vec<TreeLeaf>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ImpactNode {
    pub name: String,
    pub types: Vec<TypeNode>,
}

impl ImpactNode {
    pub fn num_criteria(&self) -> usize {
        self.types.iter().map(|t| t.criteria.len()).sum()
    }
}

/// Errors that prevent a table from being turned into criteria.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TreeErrors {
    /// Some required columns are absent. `found` lists the columns that were present.
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}

impl Error for TreeErrors {}

impl Display for TreeErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeErrors::MissingColumns { missing, found } => write!(
                f,
                "missing required columns {:?}; columns found: {:?}",
                missing, found
            ),
        }
    }
}
