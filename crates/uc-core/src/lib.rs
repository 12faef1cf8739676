//! Configuration, types, and shared structures for ucvis.
//!
//! Records, status classification, pivoting and color lookups live here;
//! the other crates only load, draw and write.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod pivot;
pub mod record;
pub mod status;
pub mod traits;

pub use color::{ColorLookup, Rgb, ScopeColors};
pub use config::VisualConfig;
pub use error::CoreError;
pub use frame::FrameBuffer;
pub use pivot::{AggregationPolicy, PivotGrid};
pub use record::MappingRecord;
pub use status::DataStatus;
