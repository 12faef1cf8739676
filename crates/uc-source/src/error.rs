use thiserror::Error;

/// Errors raised while reading the mapping sheet. All of them are fatal.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// The file exists but is not a readable workbook.
    #[error("Classeur illisible {path} : {reason}")]
    Workbook {
        /// Workbook path.
        path: String,
        /// Message from the spreadsheet reader.
        reason: String,
    },

    /// The requested sheet is not in the workbook.
    #[error("Feuille introuvable : '{sheet}' (disponibles : {available})")]
    SheetNotFound {
        /// Requested sheet name.
        sheet: String,
        /// Comma-separated list of the sheets that do exist.
        available: String,
    },

    /// The sheet has no header row.
    #[error("Feuille vide : '{sheet}'")]
    EmptySheet {
        /// Sheet name.
        sheet: String,
    },

    /// One or more required headers are absent.
    #[error("Colonnes manquantes : {}", columns.join(", "))]
    MissingColumns {
        /// Missing header names, in schema order.
        columns: Vec<String>,
    },
}
