// The documents handed to the presentation layer.

use serde_json::json;
use serde_json::Value as JSValue;

use crate::dash::*;

fn counts_to_json(counts: &[(String, u64)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|(name, count)| json!({"name": name, "count": count}))
        .collect()
}

fn pair_counts_to_json(counts: &[((String, String), u64)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|((impact, type_name), count)| {
            json!({"impact": impact, "type": type_name, "count": count})
        })
        .collect()
}

fn record_to_json(r: &CriterionRecord) -> JSValue {
    json!({
        "impact": r.impact,
        "type": r.type_name,
        "critère": r.criterion,
        "description": r.description,
    })
}

fn tree_to_json(tree: &[ImpactNode]) -> Vec<JSValue> {
    tree.iter()
        .map(|impact| {
            let types: Vec<JSValue> = impact
                .types
                .iter()
                .map(|t| {
                    let criteria: Vec<JSValue> = t
                        .criteria
                        .iter()
                        .map(|leaf| {
                            json!({
                                "critère": leaf.record.criterion,
                                "description": leaf.record.description,
                                "label": leaf.label,
                                "path": leaf.path,
                                "hover": leaf.hover,
                            })
                        })
                        .collect();
                    json!({"name": t.name, "count": criteria.len(), "criteria": criteria})
                })
                .collect();
            json!({"name": impact.name, "count": impact.num_criteria(), "types": types})
        })
        .collect()
}

/// Assembles the dashboard document.
///
/// The summary and the tree cover all the criteria; `records` only holds the
/// criteria matching the search query.
pub fn build_payload(
    config: &DashboardConfig,
    loaded: &LoadedCriteria,
    query: &str,
) -> DashResult<JSValue> {
    let max_width = config.max_chars_per_line()?;
    let title = config.title();
    let records = &loaded.records;
    let tree = build_tree(records, &title, max_width);
    let matches = search(records, query);
    debug!(
        "build_payload: {} criteria, {} matching {:?}",
        records.len(),
        matches.len(),
        query
    );

    Ok(json!({
        "title": title,
        "source": loaded.source,
        "format": loaded.format,
        "warning": loaded.warning,
        "summary": {
            "criteria": records.len(),
            "impacts": distinct_impacts(records),
            "byImpact": counts_to_json(&count_by_impact(records)),
            "byType": counts_to_json(&count_by_type(records)),
            "byImpactAndType": pair_counts_to_json(&count_by_impact_and_type(records)),
        },
        "tree": tree_to_json(&tree),
        "search": {
            "query": query,
            "matches": matches.len(),
        },
        "records": matches.iter().map(|r| record_to_json(r)).collect::<Vec<JSValue>>(),
    }))
}

/// Writes the document to a file, or to the standard output for `stdout`.
pub fn write_payload(payload: &JSValue, out: &str) -> DashResult<()> {
    let pretty = serde_json::to_string_pretty(payload).context(SerializingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(out, pretty).context(WritingOutputSnafu { path: out })?;
        info!("write_payload: wrote {}", out);
    }
    Ok(())
}

/// Writes the criteria as CSV with the canonical header.
pub fn export_csv<W: std::io::Write>(records: &[&CriterionRecord], wtr: W) -> csv::Result<()> {
    let mut w = csv::Writer::from_writer(wtr);
    w.write_record(CANONICAL_COLUMNS)?;
    for r in records {
        w.write_record([
            r.impact.as_str(),
            r.type_name.as_str(),
            r.criterion.as_str(),
            r.description.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_csv_file(records: &[&CriterionRecord], path: &str) -> DashResult<()> {
    let file = fs::File::create(path).context(WritingOutputSnafu { path })?;
    export_csv(records, file).context(WritingCsvSnafu { path })?;
    info!("export_csv_file: {} criteria written to {}", records.len(), path);
    Ok(())
}
