use log::{debug, info};

use std::collections::HashMap;

use crate::config::*;
use crate::normalize::normalize;
use crate::wrap::wrap;

/// Checks that the required canonical columns are present.
pub fn check_schema(table: &CanonicalTable) -> Result<(), TreeErrors> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| table.table.column_index(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TreeErrors::MissingColumns {
            missing,
            found: table.columns().to_vec(),
        })
    }
}

// A cell is usable if something remains after trimming.
fn clean(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Turns the rows of a canonical table into criteria.
///
/// Rows without an impact, a type or a criterion are dropped. This is a
/// data-quality filter and not an error: such rows are only reported at the
/// debug level. A missing description is replaced by [`NO_DESCRIPTION`].
/// The order of the rows is preserved.
pub fn build(table: &CanonicalTable) -> Result<Vec<CriterionRecord>, TreeErrors> {
    check_schema(table)?;
    let t = &table.table;

    let mut res: Vec<CriterionRecord> = Vec::with_capacity(t.num_rows());
    for idx in 0..t.num_rows() {
        let impact = clean(t.get(idx, IMPACT_COLUMN));
        let type_name = clean(t.get(idx, TYPE_COLUMN));
        let criterion = clean(t.get(idx, CRITERION_COLUMN));
        match (impact, type_name, criterion) {
            (Some(impact), Some(type_name), Some(criterion)) => {
                let description = clean(t.get(idx, DESCRIPTION_COLUMN))
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string());
                res.push(CriterionRecord {
                    impact,
                    type_name,
                    criterion,
                    description,
                });
            }
            _ => {
                debug!("build: dropping row {}: {:?}", idx, t.rows[idx]);
            }
        }
    }

    info!(
        "build: {} criteria out of {} rows",
        res.len(),
        t.num_rows()
    );
    Ok(res)
}

/// Turns criteria back into a canonical table.
pub fn records_to_table(records: &[CriterionRecord]) -> CanonicalTable {
    let columns: Vec<String> = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|r| {
            vec![
                Some(r.impact.clone()),
                Some(r.type_name.clone()),
                Some(r.criterion.clone()),
                Some(r.description.clone()),
            ]
        })
        .collect();
    normalize(RawTable::new(columns, rows))
}

/// Groups criteria into the impact / type / criterion tree.
///
/// Impacts and types appear in the order in which they are first seen.
/// `max_width` is the number of characters per line of the leaf labels.
pub fn build_tree(records: &[CriterionRecord], root: &str, max_width: usize) -> Vec<ImpactNode> {
    let mut impacts: Vec<ImpactNode> = Vec::new();
    let mut impact_idx: HashMap<&str, usize> = HashMap::new();
    let mut type_idx: HashMap<(&str, &str), usize> = HashMap::new();

    for r in records {
        let i = *impact_idx.entry(r.impact.as_str()).or_insert_with(|| {
            impacts.push(ImpactNode {
                name: r.impact.clone(),
                types: Vec::new(),
            });
            impacts.len() - 1
        });
        let impact = &mut impacts[i];
        let j = *type_idx
            .entry((r.impact.as_str(), r.type_name.as_str()))
            .or_insert_with(|| {
                impact.types.push(TypeNode {
                    name: r.type_name.clone(),
                    criteria: Vec::new(),
                });
                impact.types.len() - 1
            });
        impact.types[j].criteria.push(TreeLeaf {
            record: r.clone(),
            path: format!("{} / {} / {} / {}", root, r.impact, r.type_name, r.criterion),
            label: wrap(&r.criterion, max_width),
            hover: format!("<b>{}</b><br>{}", r.criterion, r.description),
        });
    }

    debug!(
        "build_tree: {} impacts, {} types",
        impacts.len(),
        type_idx.len()
    );
    impacts
}
