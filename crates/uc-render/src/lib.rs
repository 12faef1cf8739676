/// Software rendering of the use case heatmap.
///
/// Provides pixel primitives, text rasterization, layout, grid and legend drawing.
pub mod canvas;
pub mod decor;
pub mod error;
pub mod figure;
pub mod grid;
pub mod layout;
pub mod text;

pub use error::RenderError;
pub use figure::render_figure;
pub use text::Typeface;
