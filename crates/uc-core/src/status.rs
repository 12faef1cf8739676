use std::fmt;

use crate::record::MappingRecord;

/// Catégories dont la valeur doit être calculée (agrégats temporels).
pub const COMPLEX_CATEGORIES: [&str; 3] = ["Utilisation", "Reliability", "Uptime"];

/// Marqueur textuel d'un champ OCPI inexistant.
pub const MISSING_FIELD_MARKER: &str = "N/A";

/// Statut de disponibilité dérivé pour un enregistrement.
///
/// # Example
/// ```
/// use uc_core::status::DataStatus;
/// assert_eq!(DataStatus::ComplexToCompute.label(), "Complex to Compute");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataStatus {
    /// Le champ existe dans OCPI et se lit directement.
    Available,
    /// Aucun champ OCPI ne couvre la donnée.
    MissingData,
    /// Le champ existe mais la valeur doit être dérivée.
    ComplexToCompute,
}

impl DataStatus {
    /// All statuses, in legend order.
    pub const ALL: [Self; 3] = [Self::Available, Self::MissingData, Self::ComplexToCompute];

    /// Display label, also the key used by the status color lookup.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::MissingData => "Missing Data",
            Self::ComplexToCompute => "Complex to Compute",
        }
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dérive le statut d'un enregistrement. Fonction totale.
///
/// 1. champ OCPI absent ou `"N/A"` → `MissingData` (quelle que soit la catégorie) ;
/// 2. catégorie ∈ {Utilisation, Reliability, Uptime} → `ComplexToCompute` ;
/// 3. sinon → `Available`.
///
/// # Example
/// ```
/// use uc_core::record::MappingRecord;
/// use uc_core::status::{classify, DataStatus};
/// let rec = MappingRecord::new("UC1", "Utilisation").with_object_field("Energy");
/// assert_eq!(classify(&rec), DataStatus::ComplexToCompute);
/// ```
#[must_use]
pub fn classify(record: &MappingRecord) -> DataStatus {
    let field_missing = record
        .ocpi_field
        .as_deref()
        .map(str::trim)
        .is_none_or(|field| field.is_empty() || field == MISSING_FIELD_MARKER);

    if field_missing {
        DataStatus::MissingData
    } else if COMPLEX_CATEGORIES.contains(&record.field_category.as_str()) {
        DataStatus::ComplexToCompute
    } else {
        DataStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORIES: [&str; 6] = [
        "Utilisation",
        "Reliability",
        "Uptime",
        "Location",
        "Pricing",
        "",
    ];

    #[test]
    fn absent_or_na_field_is_missing_for_every_category() {
        for category in CATEGORIES {
            let absent = MappingRecord::new("UC1", category);
            let na = MappingRecord::new("UC1", category).with_object_field("N/A");
            let blank = MappingRecord::new("UC1", category).with_object_field("  ");
            assert_eq!(classify(&absent), DataStatus::MissingData, "{category}");
            assert_eq!(classify(&na), DataStatus::MissingData, "{category}");
            assert_eq!(classify(&blank), DataStatus::MissingData, "{category}");
        }
    }

    #[test]
    fn present_field_is_complex_only_for_aggregate_categories() {
        for category in CATEGORIES {
            let rec = MappingRecord::new("UC1", category).with_object_field("evse_uid");
            let expected = if COMPLEX_CATEGORIES.contains(&category) {
                DataStatus::ComplexToCompute
            } else {
                DataStatus::Available
            };
            assert_eq!(classify(&rec), expected, "{category}");
        }
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let rec = MappingRecord::new("UC1", "uptime").with_object_field("status");
        assert_eq!(classify(&rec), DataStatus::Available);
    }

    #[test]
    fn uc1_utilisation_scenario() {
        let rec = MappingRecord::new("UC1", "Utilisation")
            .with_object_field("Energy")
            .with_object("EVSE")
            .with_scope_flag("Y");
        assert_eq!(classify(&rec).label(), "Complex to Compute");
    }
}
