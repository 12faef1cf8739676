use thiserror::Error;
use uc_core::CoreError;

/// Errors raised while composing the figure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing to draw: the pivot has no row or no column.
    #[error("Grille vide : {rows} ligne(s) × {cols} colonne(s)")]
    EmptyGrid {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// The computed figure does not fit in a frame buffer.
    #[error(transparent)]
    Frame(#[from] CoreError),

    /// An explicitly configured font could not be used.
    #[error("Police inutilisable {path} : {reason}")]
    Font {
        /// Font path.
        path: String,
        /// Underlying reason.
        reason: String,
    },
}
