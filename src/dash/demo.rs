// Demonstration dataset, used when the criteria file cannot be loaded.

use criteria_tree::{Cell, RawTable, CANONICAL_COLUMNS};

const DEMO_ROWS: [[&str; 4]; 12] = [
    [
        "Impacts environnementaux",
        "Climat",
        "Empreinte carbone des matériaux",
        "Émissions de gaz à effet de serre liées à la fabrication et au transport des matériaux, en kg CO2e.",
    ],
    [
        "Impacts environnementaux",
        "Climat",
        "Consommation d'énergie en exploitation",
        "Énergie finale consommée chaque année par le bâtiment, rapportée à la surface.",
    ],
    [
        "Impacts environnementaux",
        "Ressources",
        "Part de matériaux biosourcés",
        "Proportion de matériaux d'origine végétale ou animale dans la construction.",
    ],
    [
        "Impacts environnementaux",
        "Ressources",
        "Réemploi des matériaux",
        "",
    ],
    [
        "Impacts environnementaux",
        "Biodiversité",
        "Surface végétalisée",
        "Part de la parcelle laissée en pleine terre ou végétalisée.",
    ],
    [
        "Impacts environnementaux",
        "Eau",
        "Gestion des eaux pluviales",
        "Infiltration et récupération des eaux de pluie sur la parcelle.",
    ],
    [
        "Impacts sociaux",
        "Santé",
        "Qualité de l'air intérieur",
        "Émissions de polluants des revêtements et efficacité de la ventilation.",
    ],
    [
        "Impacts sociaux",
        "Santé",
        "Confort d'été",
        "Nombre d'heures d'inconfort thermique pendant les vagues de chaleur.",
    ],
    [
        "Impacts sociaux",
        "Territoire",
        "Emplois locaux",
        "Part des heures de travail réalisées par des entreprises du territoire.",
    ],
    [
        "Impacts économiques",
        "Coût global",
        "Coût d'exploitation et de maintenance",
        "Dépenses prévisionnelles sur trente ans, hors investissement initial.",
    ],
    [
        "Impacts économiques",
        "Coût global",
        "Durabilité des équipements",
        "Durée de vie moyenne des équipements techniques avant remplacement.",
    ],
    [
        "Impacts économiques",
        "Filières",
        "Approvisionnement régional",
        "Part des achats réalisés auprès de fournisseurs situés à moins de 150 km.",
    ],
];

/// A small criteria table with the canonical columns.
pub fn demo_table() -> RawTable {
    let columns: Vec<String> = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<Cell>> = DEMO_ROWS
        .iter()
        .map(|row| {
            row.iter()
                .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
                .collect()
        })
        .collect();
    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use criteria_tree::{build, count_by_impact, normalize, NO_DESCRIPTION};

    #[test]
    fn demo_goes_through_the_pipeline() {
        let records = build(&normalize(demo_table())).unwrap();
        assert_eq!(records.len(), DEMO_ROWS.len());
        assert_eq!(records[3].description, NO_DESCRIPTION);
        assert_eq!(count_by_impact(&records).len(), 3);
    }
}
