use uc_core::color::{ColorLookup, Rgb};
use uc_core::config::ColorConfig;
use uc_core::frame::FrameBuffer;
use uc_core::pivot::PivotGrid;

use crate::canvas::{Rect, dashed_hline, dashed_vline, fill_rect, hline, vline};
use crate::layout::{PanelGeometry, PanelKind};

/// Couleur des traits pointillés (lignes mineures).
pub const MINOR_LINE: Rgb = Rgb(0x80, 0x80, 0x80);
/// Couleur des traits pleins entre cellules.
pub const MAJOR_LINE: Rgb = Rgb::BLACK;
/// Épaisseur des traits pleins.
pub const MAJOR_THICKNESS: i64 = 2;

fn paint(fb: &mut FrameBuffer, rect: Rect, lookup: &ColorLookup, label: Option<&str>) {
    fill_rect(fb, rect, lookup.resolve(label));
}

/// Remplit les cellules d'un panneau selon son type.
///
/// Une cellule sans valeur prend la couleur de repli de la table.
pub fn draw_cells(
    fb: &mut FrameBuffer,
    panel: &PanelGeometry,
    grid: &PivotGrid,
    colors: &ColorConfig,
) {
    for row in 0..panel.rows {
        for col in 0..panel.cols {
            let cell = panel.cell_rect(row, col);
            match panel.kind {
                PanelKind::Split => {
                    let top_h = cell.h / 2;
                    let top = Rect::new(cell.x, cell.y, cell.w, top_h);
                    let bottom = Rect::new(cell.x, cell.y + top_h, cell.w, cell.h - top_h);
                    paint(fb, top, &colors.objects, grid.object(row, col));
                    paint(fb, bottom, &colors.statuses, grid.status(row, col));
                }
                PanelKind::Objects => paint(fb, cell, &colors.objects, grid.object(row, col)),
                PanelKind::Statuses => paint(fb, cell, &colors.statuses, grid.status(row, col)),
            }
        }
    }
}

/// Quadrillage : pointillés aux séparations internes (et à mi-cellule en
/// mode coupé), puis traits pleins sur toutes les séparations, cadre inclus.
pub fn draw_gridlines(fb: &mut FrameBuffer, panel: &PanelGeometry) {
    let g = panel.grid;
    for col in 1..panel.cols {
        dashed_vline(fb, g.x + col as i64 * panel.cell_w, g.y, g.bottom(), MINOR_LINE);
    }
    for row in 1..panel.rows {
        dashed_hline(fb, g.x, g.right(), g.y + row as i64 * panel.cell_h, MINOR_LINE);
    }
    if panel.kind == PanelKind::Split {
        for row in 0..panel.rows {
            let y = g.y + row as i64 * panel.cell_h + panel.cell_h / 2;
            dashed_hline(fb, g.x, g.right(), y, MINOR_LINE);
        }
    }

    for col in 0..=panel.cols {
        let x = g.x + col as i64 * panel.cell_w;
        vline(fb, x, g.y - 1, g.bottom() + 1, MAJOR_THICKNESS, MAJOR_LINE);
    }
    for row in 0..=panel.rows {
        let y = g.y + row as i64 * panel.cell_h;
        hline(fb, g.x - 1, g.right() + 1, y, MAJOR_THICKNESS, MAJOR_LINE);
    }
}
