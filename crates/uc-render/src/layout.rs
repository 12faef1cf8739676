use std::f32::consts::FRAC_1_SQRT_2;

use uc_core::config::{Layout, RenderConfig};
use uc_core::pivot::PivotGrid;

use crate::canvas::Rect;
use crate::decor::{Legend, OBJECT_PANEL_TITLE, STATUS_PANEL_TITLE, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::text::Typeface;

/// Tailles de texte et marges dérivées de `font_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub text_px: f32,
    pub title_px: f32,
    pub figure_title_px: f32,
    pub axis_px: f32,
    pub pad: i64,
    pub box_pad: i64,
}

impl Metrics {
    #[must_use]
    pub fn from_font_size(font_size: f32) -> Self {
        Self {
            text_px: font_size,
            title_px: font_size * 1.3,
            figure_title_px: font_size * 1.6,
            axis_px: font_size * 1.2,
            pad: ((font_size * 0.6).round() as i64).max(4),
            box_pad: ((font_size * 0.3).round() as i64).max(2),
        }
    }
}

/// Ce que montre un panneau.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Cellule coupée : objet en haut, statut en bas.
    Split,
    /// Couleur d'objet pleine cellule.
    Objects,
    /// Couleur de statut pleine cellule.
    Statuses,
}

impl PanelKind {
    /// Panneaux de chaque mise en page, de gauche à droite.
    #[must_use]
    pub fn for_layout(layout: Layout) -> &'static [Self] {
        match layout {
            Layout::Split => &[Self::Split],
            Layout::Panels => &[Self::Objects, Self::Statuses],
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Split => "",
            Self::Objects => OBJECT_PANEL_TITLE,
            Self::Statuses => STATUS_PANEL_TITLE,
        }
    }
}

/// Position de chaque élément d'un panneau dans l'image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelGeometry {
    pub kind: PanelKind,
    /// Zone des cellules, cadre compris.
    pub grid: Rect,
    pub cell_w: i64,
    pub cell_h: i64,
    pub rows: usize,
    pub cols: usize,
    /// Centre du titre de panneau (mise en page `Panels` seulement).
    pub title_center: Option<(i64, i64)>,
    /// Bord droit des libellés de ligne.
    pub row_label_right: i64,
    /// Abscisse du centre du titre d'axe vertical.
    pub y_title_x: i64,
    /// Haut de la bande des libellés de colonne.
    pub x_labels_top: i64,
    /// Ordonnée du centre du titre d'axe horizontal.
    pub x_title_y: i64,
    /// Coin haut-gauche de la pile de légendes.
    pub legend_origin: (i64, i64),
}

impl PanelGeometry {
    /// Rectangle de la cellule (`row`, `col`).
    #[must_use]
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.grid.x + col as i64 * self.cell_w,
            self.grid.y + row as i64 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }
}

/// Géométrie complète de la figure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    /// Centre du titre de figure, absent si le titre est vide.
    pub title_center: Option<(i64, i64)>,
    pub panels: Vec<PanelGeometry>,
}

fn text_w(face: &Typeface, text: &str, px: f32) -> i64 {
    face.measure(text, px).0.ceil() as i64
}

fn text_h(face: &Typeface, text: &str, px: f32) -> i64 {
    face.measure(text, px).1.ceil() as i64
}

/// Place titres, libellés, grilles et légendes.
///
/// `legends` donne la pile de légendes de chaque panneau, dans l'ordre de
/// [`PanelKind::for_layout`].
#[must_use]
pub fn compute(
    grid: &PivotGrid,
    render: &RenderConfig,
    face: &Typeface,
    metrics: &Metrics,
    legends: &[Vec<Legend>],
) -> FigureLayout {
    let (rows, cols) = grid.dimensions();
    let cell_w = i64::from(render.cell_width);
    let cell_h = i64::from(render.cell_height);
    let margin = i64::from(render.margin);
    let pad = metrics.pad;
    let grid_w = cols as i64 * cell_w;
    let grid_h = rows as i64 * cell_h;

    // Bloc de gauche : titre d'axe tourné puis libellés de ligne.
    let label_h = text_h(face, "Ag", metrics.text_px);
    let axis_h = text_h(face, Y_AXIS_TITLE, metrics.axis_px);
    let row_label_w = grid
        .rows()
        .iter()
        .map(|r| text_w(face, r, metrics.text_px))
        .max()
        .unwrap_or(0);
    let row_block = row_label_w + 2 * metrics.box_pad + pad;

    // Libellés de colonne à 45° : emprise sous la grille et débord à gauche.
    let diag = |w: i64| ((w + label_h) as f32 * FRAC_1_SQRT_2).ceil() as i64;
    let mut col_extent = 0;
    let mut left_overflow = 0;
    for (j, c) in grid.columns().iter().enumerate() {
        let reach = diag(text_w(face, c, metrics.text_px));
        col_extent = col_extent.max(reach);
        left_overflow = left_overflow.max(reach - (j as i64 * cell_w + cell_w / 2));
    }
    let left_block = (axis_h + pad + row_block).max(left_overflow + pad);
    let below = pad + col_extent + pad + text_h(face, X_AXIS_TITLE, metrics.axis_px);

    let panel_title_h = match render.layout {
        Layout::Split => 0,
        Layout::Panels => text_h(face, "Ag", metrics.title_px) + pad,
    };
    let figure_title_h = if render.title.is_empty() {
        0
    } else {
        text_h(face, &render.title, metrics.figure_title_px) + pad
    };

    let top = margin + figure_title_h;
    let mut cursor = margin;
    let mut panel_bottom = top;
    let mut panels = Vec::new();
    for (i, &kind) in PanelKind::for_layout(render.layout).iter().enumerate() {
        let stack = legends.get(i).map(Vec::as_slice).unwrap_or_default();
        let sizes: Vec<(i64, i64)> = stack.iter().map(|l| l.measure(face, metrics)).collect();
        let legend_w = sizes.iter().map(|s| s.0).max().unwrap_or(0);
        let legend_h = sizes.iter().map(|s| s.1 + pad).sum::<i64>();

        let grid_rect = Rect::new(cursor + left_block, top + panel_title_h, grid_w, grid_h);
        let x_labels_top = grid_rect.bottom() + pad;
        panels.push(PanelGeometry {
            kind,
            grid: grid_rect,
            cell_w,
            cell_h,
            rows,
            cols,
            title_center: (panel_title_h > 0)
                .then(|| (grid_rect.x + grid_w / 2, top + (panel_title_h - pad) / 2)),
            row_label_right: grid_rect.x - pad,
            y_title_x: cursor + axis_h / 2,
            x_labels_top,
            x_title_y: x_labels_top + col_extent + pad + axis_h / 2,
            legend_origin: (grid_rect.right() + 2 * pad, grid_rect.y),
        });

        let legend_gap = if legend_w > 0 { 2 * pad } else { 0 };
        let panel_w = left_block + grid_w + legend_gap + legend_w;
        panel_bottom = panel_bottom
            .max(grid_rect.bottom() + below)
            .max(grid_rect.y + legend_h);
        cursor += panel_w + 2 * pad;
    }
    let content_right = cursor - 2 * pad;

    let title_w = text_w(face, &render.title, metrics.figure_title_px);
    let width = (content_right + margin).max(title_w + 2 * margin);
    let height = panel_bottom + margin;
    FigureLayout {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: u32::try_from(height).unwrap_or(u32::MAX),
        title_center: (figure_title_h > 0).then(|| (width / 2, margin + (figure_title_h - pad) / 2)),
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uc_core::config::{Preset, VisualConfig};
    use uc_core::pivot::AggregationPolicy;
    use uc_core::record::MappingRecord;

    use crate::decor::legends_for;

    fn grid() -> PivotGrid {
        let records = vec![
            MappingRecord::new("UC1", "Utilisation").with_object("EVSE"),
            MappingRecord::new("UC2", "Location").with_object("Session"),
            MappingRecord::new("UC3", "Pricing").with_object("Connector"),
        ];
        PivotGrid::build(&records, AggregationPolicy::First)
    }

    fn layout_for(preset: Preset) -> FigureLayout {
        let config = VisualConfig::preset(preset);
        let legends = legends_for(&config.colors, config.render.layout);
        compute(
            &grid(),
            &config.render,
            &Typeface::none(),
            &Metrics::from_font_size(config.render.font_size),
            &legends,
        )
    }

    #[test]
    fn split_has_one_panel_inside_the_image() {
        let layout = layout_for(Preset::Split);
        assert_eq!(layout.panels.len(), 1);
        let panel = &layout.panels[0];
        assert_eq!(panel.kind, PanelKind::Split);
        assert!(panel.title_center.is_none());
        assert!(layout.title_center.is_some());
        assert!(panel.grid.x > 0 && panel.grid.y > 0);
        assert!(panel.grid.right() < i64::from(layout.width));
        assert!(panel.x_title_y < i64::from(layout.height));
        assert!(panel.legend_origin.0 > panel.grid.right());
    }

    #[test]
    fn panels_sit_side_by_side() {
        let layout = layout_for(Preset::Panels);
        assert_eq!(layout.panels.len(), 2);
        let (left, right) = (&layout.panels[0], &layout.panels[1]);
        assert_eq!(left.kind, PanelKind::Objects);
        assert_eq!(right.kind, PanelKind::Statuses);
        assert_eq!(left.grid.y, right.grid.y);
        assert!(right.grid.x > left.legend_origin.0);
        assert!(left.title_center.is_some());
        // Titre vide : pas de bandeau.
        assert!(layout.title_center.is_none());
    }

    #[test]
    fn cells_tile_the_grid() {
        let layout = layout_for(Preset::Split);
        let panel = &layout.panels[0];
        let first = panel.cell_rect(0, 0);
        let last = panel.cell_rect(2, 2);
        assert_eq!((first.x, first.y), (panel.grid.x, panel.grid.y));
        assert_eq!(
            (last.right(), last.bottom()),
            (panel.grid.right(), panel.grid.bottom())
        );
    }
}
