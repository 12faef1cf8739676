use crate::record::MappingRecord;

/// Fournit les enregistrements de mapping au pipeline.
///
/// Implémenté par : `SheetSource` (classeur xlsx/xls/ods) et `MemorySource`.
///
/// # Example
/// ```
/// use uc_core::record::MappingRecord;
/// use uc_core::traits::{MemorySource, RecordSource};
///
/// let mut source = MemorySource::new(vec![MappingRecord::new("UC1", "Uptime")]);
/// assert_eq!(source.load().unwrap().len(), 1);
/// assert_eq!(source.describe(), "mémoire (1 enregistrements)");
/// ```
pub trait RecordSource {
    /// Erreur de chargement propre à la source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Charge tous les enregistrements, dans l'ordre de la source.
    ///
    /// # Errors
    /// Returns the source-specific error if the data cannot be read.
    fn load(&mut self) -> Result<Vec<MappingRecord>, Self::Error>;

    /// Description lisible pour les logs.
    fn describe(&self) -> String;
}

/// Source en mémoire, utile pour les tests et l'intégration.
pub struct MemorySource {
    records: Vec<MappingRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(records: Vec<MappingRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    type Error = std::convert::Infallible;

    fn load(&mut self) -> Result<Vec<MappingRecord>, Self::Error> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("mémoire ({} enregistrements)", self.records.len())
    }
}
