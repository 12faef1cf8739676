use std::f32::consts::FRAC_1_SQRT_2;

use uc_core::color::{ColorLookup, Rgb, ScopeColors};
use uc_core::config::{ColorConfig, Layout};
use uc_core::frame::FrameBuffer;
use uc_core::pivot::PivotGrid;

use crate::canvas::{Rect, fill_rect, fill_rounded_rect, stroke_rect};
use crate::layout::{Metrics, PanelGeometry};
use crate::text::{Anchor, Typeface};

pub const X_AXIS_TITLE: &str = "Field Category";
pub const Y_AXIS_TITLE: &str = "Use Case ID";
pub const OBJECT_PANEL_TITLE: &str = "OCPI Object Details";
pub const STATUS_PANEL_TITLE: &str = "Data Availability";
pub const IN_SCOPE_LABEL: &str = "In Scope for MVP";
pub const OUT_OF_SCOPE_LABEL: &str = "Out of Scope for MVP";

/// Angle des libellés de colonne.
pub const COLUMN_LABEL_ANGLE: f32 = 45.0;

const TEXT_COLOR: Rgb = Rgb::BLACK;
const LEGEND_BORDER: Rgb = Rgb(0xcc, 0xcc, 0xcc);

/// Bloc de légende : un titre et des pastilles libellées.
///
/// # Example
/// ```
/// use uc_core::color::{ColorLookup, Rgb};
/// use uc_render::decor::Legend;
/// let lookup = ColorLookup::new(Rgb::WHITE).with("EVSE", Rgb(1, 2, 3));
/// let legend = Legend::new("OCPI Object").extend_lookup(&lookup);
/// assert_eq!(legend.items, vec![("EVSE".to_string(), Rgb(1, 2, 3))]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legend {
    pub title: String,
    pub items: Vec<(String, Rgb)>,
}

impl Legend {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Une pastille par entrée de la table, dans l'ordre de la table.
    #[must_use]
    pub fn extend_lookup(mut self, lookup: &ColorLookup) -> Self {
        self.items
            .extend(lookup.entries.iter().map(|e| (e.label.clone(), e.color)));
        self
    }

    /// Les deux pastilles de surlignage MVP.
    #[must_use]
    pub fn extend_scope(mut self, scope: &ScopeColors) -> Self {
        self.items.push((IN_SCOPE_LABEL.to_string(), scope.in_scope));
        self.items
            .push((OUT_OF_SCOPE_LABEL.to_string(), scope.out_of_scope));
        self
    }

    fn swatch(metrics: &Metrics) -> (i64, i64) {
        (
            (metrics.text_px * 1.6).round() as i64,
            (metrics.text_px * 0.9).round() as i64,
        )
    }

    fn line_height(face: &Typeface, metrics: &Metrics) -> i64 {
        let text_h = face.measure("Ag", metrics.text_px).1.ceil() as i64;
        text_h.max(Self::swatch(metrics).1) + metrics.box_pad
    }

    /// Taille (largeur, hauteur) du bloc, cadre compris.
    #[must_use]
    pub fn measure(&self, face: &Typeface, metrics: &Metrics) -> (i64, i64) {
        let (title_w, title_h) = face.measure(&self.title, metrics.text_px);
        let (swatch_w, _) = Self::swatch(metrics);
        let label_w = self
            .items
            .iter()
            .map(|(label, _)| face.measure(label, metrics.text_px).0.ceil() as i64)
            .max()
            .unwrap_or(0);
        let inner_w = (title_w.ceil() as i64).max(swatch_w + metrics.pad + label_w);
        let inner_h = title_h.ceil() as i64
            + metrics.box_pad
            + self.items.len() as i64 * Self::line_height(face, metrics);
        (inner_w + 2 * metrics.pad, inner_h + 2 * metrics.pad)
    }

    /// Trace le bloc avec son coin haut-gauche en (`x`, `y`). Renvoie sa hauteur.
    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        face: &Typeface,
        metrics: &Metrics,
        x: i64,
        y: i64,
    ) -> i64 {
        let (w, h) = self.measure(face, metrics);
        let frame = Rect::new(x, y, w, h);
        fill_rect(fb, frame, Rgb::WHITE);
        stroke_rect(fb, frame, LEGEND_BORDER);

        let title_h = face.measure(&self.title, metrics.text_px).1.ceil() as i64;
        face.draw(
            fb,
            &self.title,
            metrics.text_px,
            (x + w / 2) as f32,
            (y + metrics.pad) as f32,
            Anchor::TOP_CENTER,
            0.0,
            TEXT_COLOR,
        );

        let (swatch_w, swatch_h) = Self::swatch(metrics);
        let line_h = Self::line_height(face, metrics);
        let mut line_y = y + metrics.pad + title_h + metrics.box_pad;
        for (label, color) in &self.items {
            let mid = line_y + line_h / 2;
            fill_rect(
                fb,
                Rect::new(x + metrics.pad, mid - swatch_h / 2, swatch_w, swatch_h),
                *color,
            );
            face.draw(
                fb,
                label,
                metrics.text_px,
                (x + metrics.pad + swatch_w + metrics.pad) as f32,
                mid as f32,
                Anchor::MIDDLE_LEFT,
                0.0,
                TEXT_COLOR,
            );
            line_y += line_h;
        }
        h
    }
}

/// Légendes de chaque panneau, dans l'ordre des panneaux.
///
/// `Split` : une légende (statuts, objets, périmètre MVP).
/// `Panels` : objets à gauche ; statuts puis périmètre MVP à droite.
#[must_use]
pub fn legends_for(colors: &ColorConfig, layout: Layout) -> Vec<Vec<Legend>> {
    match layout {
        Layout::Split => vec![vec![
            Legend::new("Legend")
                .extend_lookup(&colors.statuses)
                .extend_lookup(&colors.objects)
                .extend_scope(&colors.scope),
        ]],
        Layout::Panels => vec![
            vec![Legend::new("OCPI Object").extend_lookup(&colors.objects)],
            vec![
                Legend::new(STATUS_PANEL_TITLE).extend_lookup(&colors.statuses),
                Legend::new("MVP Scope").extend_scope(&colors.scope),
            ],
        ],
    }
}

/// Empile les légendes d'un panneau à partir de `legend_origin`.
pub fn draw_legends(
    fb: &mut FrameBuffer,
    face: &Typeface,
    metrics: &Metrics,
    panel: &PanelGeometry,
    legends: &[Legend],
) {
    let (x, mut y) = panel.legend_origin;
    for legend in legends {
        y += legend.draw(fb, face, metrics, x, y) + metrics.pad;
    }
}

/// Libellés de ligne sur fond surligné selon le drapeau MVP.
pub fn draw_row_labels(
    fb: &mut FrameBuffer,
    face: &Typeface,
    metrics: &Metrics,
    panel: &PanelGeometry,
    grid: &PivotGrid,
    scope: &ScopeColors,
) {
    for (row, label) in grid.rows().iter().enumerate() {
        let (text_w, text_h) = face.measure(label, metrics.text_px);
        let box_w = text_w.ceil() as i64 + 2 * metrics.box_pad;
        let box_h = text_h.ceil() as i64 + metrics.box_pad;
        let (_, mid) = panel.cell_rect(row, 0).center();
        let highlight = Rect::new(panel.row_label_right - box_w, mid - box_h / 2, box_w, box_h);
        fill_rounded_rect(fb, highlight, metrics.box_pad, scope.resolve(grid.in_scope(row)));
        face.draw(
            fb,
            label,
            metrics.text_px,
            (panel.row_label_right - metrics.box_pad) as f32,
            mid as f32,
            Anchor::MIDDLE_RIGHT,
            0.0,
            scope.text,
        );
    }
}

/// Libellés de colonne tournés à 45°, ancrés par leur extrémité droite sous chaque colonne.
pub fn draw_column_labels(
    fb: &mut FrameBuffer,
    face: &Typeface,
    metrics: &Metrics,
    panel: &PanelGeometry,
    grid: &PivotGrid,
) {
    let text_h = face.measure("Ag", metrics.text_px).1;
    // Décale l'ancre pour que le coin haut du texte tourné ne morde pas la grille.
    let y = panel.x_labels_top as f32 + text_h * FRAC_1_SQRT_2 / 2.0;
    for (col, label) in grid.columns().iter().enumerate() {
        let (cx, _) = panel.cell_rect(0, col).center();
        face.draw(
            fb,
            label,
            metrics.text_px,
            cx as f32,
            y,
            Anchor::MIDDLE_RIGHT,
            COLUMN_LABEL_ANGLE,
            TEXT_COLOR,
        );
    }
}

/// Titres d'axes et titre de panneau.
pub fn draw_titles(
    fb: &mut FrameBuffer,
    face: &Typeface,
    metrics: &Metrics,
    panel: &PanelGeometry,
) {
    let (grid_cx, grid_cy) = panel.grid.center();
    face.draw(
        fb,
        X_AXIS_TITLE,
        metrics.axis_px,
        grid_cx as f32,
        panel.x_title_y as f32,
        Anchor::CENTER,
        0.0,
        TEXT_COLOR,
    );
    face.draw(
        fb,
        Y_AXIS_TITLE,
        metrics.axis_px,
        panel.y_title_x as f32,
        grid_cy as f32,
        Anchor::CENTER,
        90.0,
        TEXT_COLOR,
    );
    if let Some((x, y)) = panel.title_center {
        face.draw(
            fb,
            panel.kind.title(),
            metrics.title_px,
            x as f32,
            y as f32,
            Anchor::CENTER,
            0.0,
            TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uc_core::config::{Preset, VisualConfig};

    #[test]
    fn split_layout_has_one_legend_with_every_swatch() {
        let config = VisualConfig::preset(Preset::Split);
        let legends = legends_for(&config.colors, Layout::Split);
        assert_eq!(legends.len(), 1);
        assert_eq!(legends[0].len(), 1);
        let labels: Vec<&str> = legends[0][0].items.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Available",
                "Missing Data",
                "Complex to Compute",
                "EVSE",
                "Session",
                "Connector",
                "N/A",
                IN_SCOPE_LABEL,
                OUT_OF_SCOPE_LABEL,
            ]
        );
    }

    #[test]
    fn panels_layout_splits_legends_per_panel() {
        let config = VisualConfig::preset(Preset::Panels);
        let legends = legends_for(&config.colors, Layout::Panels);
        assert_eq!(legends.len(), 2);
        assert_eq!(legends[0][0].items.len(), 4);
        assert_eq!(legends[1][0].title, STATUS_PANEL_TITLE);
        assert_eq!(
            legends[1][1].items,
            vec![
                (IN_SCOPE_LABEL.to_string(), Rgb(0x00, 0x80, 0x80)),
                (OUT_OF_SCOPE_LABEL.to_string(), Rgb(0x40, 0x40, 0x40)),
            ]
        );
    }

    #[test]
    fn legend_grows_with_items() {
        let face = Typeface::none();
        let metrics = Metrics::from_font_size(12.0);
        let small = Legend::new("T").extend_scope(&VisualConfig::default().colors.scope);
        let big = small
            .clone()
            .extend_lookup(&VisualConfig::default().colors.objects);
        let (w1, h1) = small.measure(&face, &metrics);
        let (w2, h2) = big.measure(&face, &metrics);
        assert!(h2 > h1);
        assert!(w2 >= w1);
    }
}
