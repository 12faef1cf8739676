/// Valeur du drapeau MVP qui marque un cas d'usage comme "in scope".
pub const IN_SCOPE_MARKER: &str = "Y";

/// One row of the "use case field mapping" sheet.
///
/// Les champs texte sont déjà nettoyés par le loader (trim, cellules vides → `None`).
///
/// # Example
/// ```
/// use uc_core::record::MappingRecord;
/// let rec = MappingRecord::new("UC1", "Utilisation")
///     .with_object_field("Energy")
///     .with_object("EVSE")
///     .with_scope_flag("Y");
/// assert!(rec.is_in_scope());
/// assert_eq!(rec.ocpi_object.as_deref(), Some("EVSE"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingRecord {
    /// Identifiant du cas d'usage (colonne `Use Case ID`).
    pub use_case_id: String,
    /// Catégorie de champ (colonne `Field Category`).
    pub field_category: String,
    /// Champ OCPI source (colonne `OCPI object field`), absent si vide.
    pub ocpi_field: Option<String>,
    /// Objet OCPI porteur du champ (colonne `OCPI object`).
    pub ocpi_object: Option<String>,
    /// Raw `In_Scope_For_MVP_Release_2` value.
    pub scope_flag: Option<String>,
}

impl MappingRecord {
    /// Build a record with only the two key fields set.
    #[must_use]
    pub fn new(use_case_id: impl Into<String>, field_category: impl Into<String>) -> Self {
        Self {
            use_case_id: use_case_id.into(),
            field_category: field_category.into(),
            ocpi_field: None,
            ocpi_object: None,
            scope_flag: None,
        }
    }

    #[must_use]
    pub fn with_object_field(mut self, field: impl Into<String>) -> Self {
        self.ocpi_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.ocpi_object = Some(object.into());
        self
    }

    #[must_use]
    pub fn with_scope_flag(mut self, flag: impl Into<String>) -> Self {
        self.scope_flag = Some(flag.into());
        self
    }

    /// True si le drapeau MVP vaut exactement `"Y"` (après trim).
    #[must_use]
    pub fn is_in_scope(&self) -> bool {
        self.scope_flag
            .as_deref()
            .is_some_and(|flag| flag.trim() == IN_SCOPE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_flag_requires_exact_y() {
        assert!(MappingRecord::new("a", "b").with_scope_flag(" Y ").is_in_scope());
        assert!(!MappingRecord::new("a", "b").with_scope_flag("y").is_in_scope());
        assert!(!MappingRecord::new("a", "b").with_scope_flag("N").is_in_scope());
        assert!(!MappingRecord::new("a", "b").is_in_scope());
    }
}
