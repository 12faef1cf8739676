//! Mapping-sheet loading for ucvis (xlsx, xlsm, xls, ods via calamine).

pub mod error;
pub mod sheet;

pub use error::LoadError;
pub use sheet::{SheetSource, load_records};
