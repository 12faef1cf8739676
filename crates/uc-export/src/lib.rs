/// PNG export of composed figures.
pub mod error;
pub mod png;

pub use error::ExportError;
pub use png::export_png;
