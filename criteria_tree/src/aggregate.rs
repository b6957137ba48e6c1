use std::collections::HashMap;
use std::hash::Hash;

use crate::config::*;

// Counts the keys, in the order in which they are first seen.
fn tally<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut res: Vec<(K, u64)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();
    for k in keys {
        if let Some(pos) = positions.get(&k) {
            res[*pos].1 += 1;
        } else {
            positions.insert(k.clone(), res.len());
            res.push((k, 1));
        }
    }
    res
}

/// Number of criteria per impact.
pub fn count_by_impact(records: &[CriterionRecord]) -> Vec<(String, u64)> {
    tally(records.iter().map(|r| r.impact.clone()))
}

/// Number of criteria per type, across all the impacts.
pub fn count_by_type(records: &[CriterionRecord]) -> Vec<(String, u64)> {
    tally(records.iter().map(|r| r.type_name.clone()))
}

/// Number of criteria per (impact, type) pair.
pub fn count_by_impact_and_type(records: &[CriterionRecord]) -> Vec<((String, String), u64)> {
    tally(
        records
            .iter()
            .map(|r| (r.impact.clone(), r.type_name.clone())),
    )
}

/// The impacts, in the order in which they first appear.
pub fn distinct_impacts(records: &[CriterionRecord]) -> Vec<String> {
    count_by_impact(records)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// Case-insensitive substring search over the criterion, the description,
/// the type and the impact.
///
/// A blank query disables the search and returns every record.
pub fn search<'a>(records: &'a [CriterionRecord], query: &str) -> Vec<&'a CriterionRecord> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            [&r.criterion, &r.description, &r.type_name, &r.impact]
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(i: &str, t: &str, c: &str, d: &str) -> CriterionRecord {
        CriterionRecord {
            impact: i.to_string(),
            type_name: t.to_string(),
            criterion: c.to_string(),
            description: d.to_string(),
        }
    }

    fn sample() -> Vec<CriterionRecord> {
        vec![
            rec("Environnement", "Climat", "Empreinte carbone des matériaux", "kg CO2e"),
            rec("Social", "Emploi", "Emplois locaux", "Part des emplois du territoire"),
            rec("Environnement", "Eau", "Consommation d'eau", NO_DESCRIPTION),
            rec("Social", "Climat", "Confort d'été", "Îlots de fraîcheur"),
            rec("Économie", "Emploi", "Sous-traitance locale", "Achats locaux"),
        ]
    }

    #[test]
    fn counts_follow_first_seen_order() {
        let r = sample();
        assert_eq!(
            count_by_impact(&r),
            vec![
                ("Environnement".to_string(), 2),
                ("Social".to_string(), 2),
                ("Économie".to_string(), 1)
            ]
        );
        assert_eq!(
            count_by_type(&r),
            vec![
                ("Climat".to_string(), 2),
                ("Emploi".to_string(), 2),
                ("Eau".to_string(), 1)
            ]
        );
        let pairs = count_by_impact_and_type(&r);
        assert_eq!(pairs.len(), 5);
        assert_eq!(
            pairs[0],
            (("Environnement".to_string(), "Climat".to_string()), 1)
        );
        assert_eq!(
            distinct_impacts(&r),
            vec!["Environnement", "Social", "Économie"]
        );
    }

    #[test]
    fn counts_add_up() {
        let r = sample();
        let total: u64 = count_by_impact(&r).iter().map(|(_, c)| c).sum();
        assert_eq!(total as usize, r.len());
        assert!(count_by_type(&[]).is_empty());
    }

    #[test]
    fn search_partial_and_case_insensitive() {
        let r = sample();
        let found = search(&r, "carbone");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].criterion, "Empreinte carbone des matériaux");
        assert_eq!(search(&r, "CARBONE").len(), 1);
        // Non-ASCII case folding.
        assert_eq!(search(&r, "éCONOMIE").len(), 1);
        assert_eq!(search(&r, "îlots")[0].criterion, "Confort d'été");
    }

    #[test]
    fn search_any_field() {
        let r = sample();
        // type
        assert_eq!(search(&r, "emploi").len(), 2);
        // impact
        assert_eq!(search(&r, "social").len(), 2);
        // description
        assert_eq!(search(&r, "co2").len(), 1);
        assert!(search(&r, "inexistant").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let r = sample();
        assert_eq!(search(&r, "").len(), r.len());
        assert_eq!(search(&r, "   ").len(), r.len());
    }
}
