use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::MappingRecord;
use crate::status::classify;

/// Séparateur utilisé par `AggregationPolicy::JoinDistinct`.
pub const JOIN_SEPARATOR: &str = ", ";

/// How several records landing in the same (use case, category) cell are merged.
///
/// The two policies disagree as soon as a cell holds divergent duplicates.
///
/// # Example
/// ```
/// use uc_core::pivot::AggregationPolicy;
/// let values = vec!["EVSE".to_string(), "Session".to_string(), "EVSE".to_string()];
/// assert_eq!(AggregationPolicy::JoinDistinct.aggregate(&values).as_deref(), Some("EVSE, Session"));
/// assert_eq!(AggregationPolicy::First.aggregate(&values).as_deref(), Some("EVSE"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum AggregationPolicy {
    /// Toutes les valeurs distinctes, dans l'ordre source, jointes par `", "`.
    #[default]
    JoinDistinct,
    /// Première valeur rencontrée dans l'ordre source.
    First,
}

impl AggregationPolicy {
    /// Merge the present values of one cell. `None` when there is nothing to merge.
    #[must_use]
    pub fn aggregate(self, values: &[String]) -> Option<String> {
        match self {
            Self::First => values.first().cloned(),
            Self::JoinDistinct => {
                let mut distinct: Vec<&str> = Vec::with_capacity(values.len());
                for value in values {
                    if !distinct.contains(&value.as_str()) {
                        distinct.push(value);
                    }
                }
                if distinct.is_empty() {
                    None
                } else {
                    Some(distinct.join(JOIN_SEPARATOR))
                }
            }
        }
    }
}

/// Table pivot (cas d'usage × catégorie) avec deux grilles alignées.
///
/// Lignes et colonnes sont triées par ordre croissant et sans doublon.
/// Une cellule sans enregistrement vaut `None`, distinct de `Some("")`.
///
/// # Example
/// ```
/// use uc_core::pivot::{AggregationPolicy, PivotGrid};
/// use uc_core::record::MappingRecord;
/// let records = vec![
///     MappingRecord::new("UC2", "Pricing").with_object_field("tariff_id").with_object("Session"),
///     MappingRecord::new("UC1", "Uptime").with_object_field("status").with_object("EVSE").with_scope_flag("Y"),
/// ];
/// let grid = PivotGrid::build(&records, AggregationPolicy::First);
/// assert_eq!(grid.rows(), ["UC1", "UC2"]);
/// assert_eq!(grid.columns(), ["Pricing", "Uptime"]);
/// assert_eq!(grid.status(0, 1), Some("Complex to Compute"));
/// assert_eq!(grid.object(0, 0), None);
/// assert!(grid.in_scope(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PivotGrid {
    rows: Vec<String>,
    columns: Vec<String>,
    /// Statuts agrégés, row-major.
    status: Vec<Option<String>>,
    /// Objets OCPI agrégés, row-major.
    objects: Vec<Option<String>>,
    /// Drapeau MVP du premier enregistrement de chaque ligne.
    scope: Vec<bool>,
}

impl PivotGrid {
    /// Regroupe les enregistrements par cellule puis applique `policy`.
    #[must_use]
    pub fn build(records: &[MappingRecord], policy: AggregationPolicy) -> Self {
        let rows: Vec<String> = records
            .iter()
            .map(|r| r.use_case_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<String> = records
            .iter()
            .map(|r| r.field_category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let width = columns.len();
        let cells = rows.len() * width;
        let mut status_acc: Vec<Vec<String>> = vec![Vec::new(); cells];
        let mut object_acc: Vec<Vec<String>> = vec![Vec::new(); cells];
        let mut scope: Vec<Option<bool>> = vec![None; rows.len()];

        for record in records {
            let (Ok(r), Ok(c)) = (
                rows.binary_search(&record.use_case_id),
                columns.binary_search(&record.field_category),
            ) else {
                continue;
            };
            let idx = r * width + c;
            status_acc[idx].push(classify(record).label().to_string());
            if let Some(object) = record.ocpi_object.as_deref() {
                object_acc[idx].push(object.to_string());
            }
            if scope[r].is_none() {
                scope[r] = Some(record.is_in_scope());
            }
        }

        let grid = Self {
            status: status_acc.iter().map(|v| policy.aggregate(v)).collect(),
            objects: object_acc.iter().map(|v| policy.aggregate(v)).collect(),
            scope: scope.into_iter().map(|s| s.unwrap_or(false)).collect(),
            rows,
            columns,
        };
        log::debug!(
            "Pivot {:?} : {} lignes × {} colonnes",
            policy,
            grid.rows.len(),
            grid.columns.len()
        );
        grid
    }

    /// Use case identifiers, ascending.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Field categories, ascending.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// True when the grid has no row or no column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Statut agrégé de la cellule, `None` si aucune donnée ou hors bornes.
    #[must_use]
    pub fn status(&self, row: usize, col: usize) -> Option<&str> {
        self.index(row, col)
            .and_then(|idx| self.status[idx].as_deref())
    }

    /// Objet OCPI agrégé de la cellule, `None` si aucune donnée ou hors bornes.
    #[must_use]
    pub fn object(&self, row: usize, col: usize) -> Option<&str> {
        self.index(row, col)
            .and_then(|idx| self.objects[idx].as_deref())
    }

    /// Drapeau MVP de la ligne (`false` hors bornes).
    #[must_use]
    pub fn in_scope(&self, row: usize) -> bool {
        self.scope.get(row).copied().unwrap_or(false)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows.len() && col < self.columns.len())
            .then(|| row * self.columns.len() + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DataStatus;

    fn sample() -> Vec<MappingRecord> {
        vec![
            MappingRecord::new("UC3", "Location")
                .with_object_field("coordinates")
                .with_object("EVSE")
                .with_scope_flag("N"),
            MappingRecord::new("UC1", "Utilisation")
                .with_object_field("Energy")
                .with_object("EVSE")
                .with_scope_flag("Y"),
            MappingRecord::new("UC1", "Pricing")
                .with_object_field("N/A")
                .with_scope_flag("N"),
            MappingRecord::new("UC2", "Location")
                .with_object_field("address")
                .with_object("Connector"),
        ]
    }

    #[test]
    fn rows_and_columns_are_distinct_and_sorted() {
        let grid = PivotGrid::build(&sample(), AggregationPolicy::JoinDistinct);
        assert_eq!(grid.rows(), ["UC1", "UC2", "UC3"]);
        assert_eq!(grid.columns(), ["Location", "Pricing", "Utilisation"]);
        assert_eq!(grid.dimensions(), (3, 3));
        assert!(!grid.is_empty());
    }

    #[test]
    fn cells_without_records_are_empty_markers() {
        let grid = PivotGrid::build(&sample(), AggregationPolicy::First);
        // UC2 × Pricing has no record.
        assert_eq!(grid.status(1, 1), None);
        assert_eq!(grid.object(1, 1), None);
        // UC1 × Pricing has a record but no OCPI object.
        assert_eq!(grid.status(0, 1), Some(DataStatus::MissingData.label()));
        assert_eq!(grid.object(0, 1), None);
        assert_eq!(grid.status(9, 9), None);
    }

    #[test]
    fn empty_string_label_is_not_the_empty_marker() {
        let records = vec![
            MappingRecord::new("UC1", "Location")
                .with_object_field("x")
                .with_object(""),
        ];
        let grid = PivotGrid::build(&records, AggregationPolicy::First);
        assert_eq!(grid.object(0, 0), Some(""));
    }

    #[test]
    fn scope_comes_from_first_record_of_the_row() {
        let grid = PivotGrid::build(&sample(), AggregationPolicy::First);
        assert!(grid.in_scope(0)); // UC1: first record says Y, second N
        assert!(!grid.in_scope(1));
        assert!(!grid.in_scope(2));
        assert!(!grid.in_scope(42));
    }

    #[test]
    fn duplicate_cell_join_distinct_concatenates() {
        let records = vec![
            MappingRecord::new("UC1", "Location")
                .with_object_field("a")
                .with_object("EVSE"),
            MappingRecord::new("UC1", "Location").with_object_field("b"),
            MappingRecord::new("UC1", "Location")
                .with_object_field("c")
                .with_object("Session"),
            MappingRecord::new("UC1", "Location")
                .with_object_field("N/A")
                .with_object("EVSE"),
        ];
        let grid = PivotGrid::build(&records, AggregationPolicy::JoinDistinct);
        assert_eq!(grid.object(0, 0), Some("EVSE, Session"));
        assert_eq!(grid.status(0, 0), Some("Available, Missing Data"));
    }

    #[test]
    fn duplicate_cell_first_keeps_first_seen() {
        let records = vec![
            MappingRecord::new("UC1", "Location")
                .with_object_field("N/A")
                .with_object("EVSE"),
            MappingRecord::new("UC1", "Location")
                .with_object_field("c")
                .with_object("Session"),
        ];
        let grid = PivotGrid::build(&records, AggregationPolicy::First);
        assert_eq!(grid.object(0, 0), Some("EVSE"));
        assert_eq!(grid.status(0, 0), Some("Missing Data"));
    }

    #[test]
    fn first_skips_absent_objects() {
        let records = vec![
            MappingRecord::new("UC1", "Location").with_object_field("a"),
            MappingRecord::new("UC1", "Location")
                .with_object_field("b")
                .with_object("Connector"),
        ];
        let grid = PivotGrid::build(&records, AggregationPolicy::First);
        assert_eq!(grid.object(0, 0), Some("Connector"));
    }

    #[test]
    fn empty_input_gives_empty_grid() {
        let grid = PivotGrid::build(&[], AggregationPolicy::JoinDistinct);
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 0));
    }
}
