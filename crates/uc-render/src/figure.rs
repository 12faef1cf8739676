use uc_core::config::VisualConfig;
use uc_core::frame::FrameBuffer;
use uc_core::pivot::PivotGrid;
use uc_core::Rgb;

use crate::decor::{self, legends_for};
use crate::error::RenderError;
use crate::grid::{draw_cells, draw_gridlines};
use crate::layout::{self, Metrics};
use crate::text::{Anchor, Typeface};

/// Compose la figure complète : grilles, quadrillage, libellés, légendes, titres.
///
/// Le rendu est déterministe pour une même grille, une même configuration
/// et une même police.
///
/// # Errors
/// - `RenderError::EmptyGrid` si la grille n'a aucune ligne ou aucune colonne.
/// - `RenderError::Frame` si l'image calculée dépasse les dimensions permises.
pub fn render_figure(
    grid: &PivotGrid,
    config: &VisualConfig,
    face: &Typeface,
) -> Result<FrameBuffer, RenderError> {
    if grid.is_empty() {
        let (rows, cols) = grid.dimensions();
        return Err(RenderError::EmptyGrid { rows, cols });
    }

    let render = &config.render;
    let metrics = Metrics::from_font_size(render.font_size);
    let legends = legends_for(&config.colors, render.layout);
    let layout = layout::compute(grid, render, face, &metrics, &legends);
    log::debug!(
        "Figure {:?} : {}×{} px, {} panneau(x)",
        render.layout,
        layout.width,
        layout.height,
        layout.panels.len()
    );

    let mut fb = FrameBuffer::filled(layout.width, layout.height, render.background)?;

    for (panel, stack) in layout.panels.iter().zip(&legends) {
        draw_cells(&mut fb, panel, grid, &config.colors);
        draw_gridlines(&mut fb, panel);
        decor::draw_row_labels(&mut fb, face, &metrics, panel, grid, &config.colors.scope);
        decor::draw_column_labels(&mut fb, face, &metrics, panel, grid);
        decor::draw_titles(&mut fb, face, &metrics, panel);
        decor::draw_legends(&mut fb, face, &metrics, panel, stack);
    }

    if let Some((x, y)) = layout.title_center {
        face.draw(
            &mut fb,
            &render.title,
            metrics.figure_title_px,
            x as f32,
            y as f32,
            Anchor::CENTER,
            0.0,
            Rgb::BLACK,
        );
    }

    Ok(fb)
}
