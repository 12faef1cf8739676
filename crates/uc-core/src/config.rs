use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{ColorLookup, Rgb, ScopeColors};
use crate::error::CoreError;
use crate::pivot::AggregationPolicy;

/// Classeur lu par défaut (relatif au répertoire courant).
pub const DEFAULT_SOURCE: &str = "Chargepoint data structure.xlsx";
/// Feuille lue par défaut.
pub const DEFAULT_SHEET: &str = "Use case field mapping";

/// Disposition de la grille.
///
/// # Example
/// ```
/// use uc_core::config::Layout;
/// assert_eq!(Layout::default(), Layout::Split);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Layout {
    /// Une grille, chaque cellule coupée : objet OCPI en haut, statut en bas.
    #[default]
    Split,
    /// Deux grilles côte à côte : objets à gauche, statuts à droite.
    Panels,
}

/// Named starting points for the configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Split cells, join-distinct aggregation, classic palette.
    #[default]
    Split,
    /// Side-by-side panels, first-value aggregation, accessible palette.
    Panels,
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "panels" => Ok(Self::Panels),
            other => Err(CoreError::Config(format!(
                "preset inconnu '{other}' (attendu : split, panels)"
            ))),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Split => "split",
            Self::Panels => "panels",
        })
    }
}

/// Where the mapping sheet comes from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub sheet: String,
}

/// Géométrie et apparence du rendu.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    pub layout: Layout,
    pub aggregation: AggregationPolicy,
    /// Largeur d'une cellule en pixels.
    pub cell_width: u32,
    /// Hauteur d'une cellule en pixels.
    pub cell_height: u32,
    /// Marge extérieure en pixels.
    pub margin: u32,
    /// Taille de base du texte en pixels (titres et axes dérivés).
    pub font_size: f32,
    /// Police TrueType explicite. `None` = recherche dans les emplacements système.
    pub font_path: Option<PathBuf>,
    /// Titre de la figure. Vide = pas de titre global.
    pub title: String,
    pub background: Rgb,
}

/// Toutes les tables de couleurs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorConfig {
    pub objects: ColorLookup,
    pub statuses: ColorLookup,
    pub scope: ScopeColors,
}

/// Configuration complète et immuable d'une exécution.
///
/// # Example
/// ```
/// use uc_core::config::{Layout, Preset, VisualConfig};
/// use uc_core::pivot::AggregationPolicy;
/// let config = VisualConfig::preset(Preset::Panels);
/// assert_eq!(config.render.layout, Layout::Panels);
/// assert_eq!(config.render.aggregation, AggregationPolicy::First);
/// assert_eq!(config.output.to_str(), Some("use_case_visualization5.png"));
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VisualConfig {
    pub source: SourceConfig,
    pub output: PathBuf,
    pub render: RenderConfig,
    pub colors: ColorConfig,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::preset(Preset::Split)
    }
}

impl VisualConfig {
    /// Build one of the two historical configurations.
    #[must_use]
    pub fn preset(preset: Preset) -> Self {
        let source = SourceConfig {
            path: PathBuf::from(DEFAULT_SOURCE),
            sheet: DEFAULT_SHEET.to_string(),
        };
        match preset {
            Preset::Split => Self {
                source,
                output: PathBuf::from("use_case_visualization2.png"),
                render: RenderConfig {
                    layout: Layout::Split,
                    aggregation: AggregationPolicy::JoinDistinct,
                    cell_width: 110,
                    cell_height: 44,
                    margin: 24,
                    font_size: 14.0,
                    font_path: None,
                    title: "Use Case Field Category Mapping with Enhanced Grid Structure"
                        .to_string(),
                    background: Rgb::WHITE,
                },
                colors: ColorConfig {
                    objects: ColorLookup::new(Rgb::WHITE)
                        .with("EVSE", Rgb(0xff, 0xdd, 0x57))
                        .with("Session", Rgb(0x8e, 0xca, 0xe6))
                        .with("Connector", Rgb(0xff, 0xb7, 0x03))
                        .with("N/A", Rgb(0xcc, 0xcc, 0xcc)),
                    statuses: ColorLookup::new(Rgb::WHITE)
                        .with("Available", Rgb(0x66, 0xc2, 0xa5))
                        .with("Missing Data", Rgb(0xfc, 0x8d, 0x62))
                        .with("Complex to Compute", Rgb(0x8d, 0xa0, 0xcb)),
                    scope: ScopeColors {
                        in_scope: Rgb(0, 128, 0),
                        out_of_scope: Rgb(255, 255, 0),
                        text: Rgb::BLACK,
                    },
                },
            },
            Preset::Panels => Self {
                source,
                output: PathBuf::from("use_case_visualization5.png"),
                render: RenderConfig {
                    layout: Layout::Panels,
                    aggregation: AggregationPolicy::First,
                    cell_width: 90,
                    cell_height: 36,
                    margin: 24,
                    font_size: 14.0,
                    font_path: None,
                    title: String::new(),
                    background: Rgb::WHITE,
                },
                colors: ColorConfig {
                    objects: ColorLookup::new(Rgb::WHITE)
                        .with("EVSE", Rgb(0x66, 0xc2, 0xa5))
                        .with("Session", Rgb(0x37, 0x7e, 0xb8))
                        .with("Connector", Rgb(0xe7, 0x29, 0x8a))
                        .with("N/A", Rgb(0x99, 0x99, 0x99)),
                    statuses: ColorLookup::new(Rgb::WHITE)
                        .with("Available", Rgb(0x1b, 0x9e, 0x77))
                        .with("Missing Data", Rgb(0xd9, 0x5f, 0x02))
                        .with("Complex to Compute", Rgb(0x75, 0x70, 0xb3)),
                    scope: ScopeColors {
                        in_scope: Rgb(0x00, 0x80, 0x80),
                        out_of_scope: Rgb(0x40, 0x40, 0x40),
                        text: Rgb::WHITE,
                    },
                },
            },
        }
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let r = &mut self.render;
        r.cell_width = r.cell_width.clamp(16, 400);
        r.cell_height = r.cell_height.clamp(12, 400);
        r.margin = r.margin.min(400);
        r.font_size = if r.font_size.is_finite() {
            r.font_size.clamp(6.0, 72.0)
        } else {
            14.0
        };
    }
}

/// Structure TOML intermédiaire : toutes les sections sont optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source: Option<SourceSection>,
    output: Option<OutputSection>,
    render: Option<RenderSection>,
    colors: Option<ColorSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceSection {
    path: Option<PathBuf>,
    sheet: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    path: Option<PathBuf>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    layout: Option<Layout>,
    aggregation: Option<AggregationPolicy>,
    cell_width: Option<u32>,
    cell_height: Option<u32>,
    margin: Option<u32>,
    font_size: Option<f32>,
    font_path: Option<PathBuf>,
    title: Option<String>,
    background: Option<Rgb>,
}

/// Chaque table remplace entièrement celle de la base (fallback compris).
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorSection {
    objects: Option<ColorLookup>,
    statuses: Option<ColorLookup>,
    scope: Option<ScopeColors>,
}

/// Charge un fichier TOML et fusionne avec `base`.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use uc_core::config::{load_config, VisualConfig};
/// use std::path::Path;
/// let config = load_config(Path::new("ucvis.toml"), VisualConfig::default()).unwrap();
/// ```
pub fn load_config(path: &Path, base: VisualConfig) -> Result<VisualConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content, base)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Même fusion que `load_config`, depuis une chaîne TOML.
///
/// # Errors
/// Returns an error if the TOML is malformed or holds unknown keys.
pub fn parse_config(content: &str, base: VisualConfig) -> Result<VisualConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = base;

    if let Some(s) = file.source {
        if let Some(v) = s.path {
            config.source.path = v;
        }
        if let Some(v) = s.sheet {
            config.source.sheet = v;
        }
    }

    if let Some(v) = file.output.and_then(|o| o.path) {
        config.output = v;
    }

    if let Some(r) = file.render {
        if let Some(v) = r.layout {
            config.render.layout = v;
        }
        if let Some(v) = r.aggregation {
            config.render.aggregation = v;
        }
        if let Some(v) = r.cell_width {
            config.render.cell_width = v;
        }
        if let Some(v) = r.cell_height {
            config.render.cell_height = v;
        }
        if let Some(v) = r.margin {
            config.render.margin = v;
        }
        if let Some(v) = r.font_size {
            config.render.font_size = v;
        }
        if let Some(v) = r.font_path {
            config.render.font_path = Some(v);
        }
        if let Some(v) = r.title {
            config.render.title = v;
        }
        if let Some(v) = r.background {
            config.render.background = v;
        }
    }

    if let Some(c) = file.colors {
        if let Some(v) = c.objects {
            config.colors.objects = v;
        }
        if let Some(v) = c.statuses {
            config.colors.statuses = v;
        }
        if let Some(v) = c.scope {
            config.colors.scope = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_split_preset() {
        let config = VisualConfig::default();
        assert_eq!(config.render.layout, Layout::Split);
        assert_eq!(config.render.aggregation, AggregationPolicy::JoinDistinct);
        assert_eq!(config.output, PathBuf::from("use_case_visualization2.png"));
        assert_eq!(config.source.sheet, DEFAULT_SHEET);
        assert_eq!(config.colors.objects.fallback, Rgb::WHITE);
        assert_eq!(config.colors.statuses.entries.len(), 3);
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("split".parse::<Preset>().unwrap(), Preset::Split);
        assert_eq!(" Panels ".parse::<Preset>().unwrap(), Preset::Panels);
        assert!("heatmap".parse::<Preset>().is_err());
        assert_eq!(Preset::Panels.to_string(), "panels");
    }

    #[test]
    fn empty_file_keeps_base() {
        let base = VisualConfig::preset(Preset::Panels);
        let config = parse_config("", base.clone()).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn partial_override_merges_field_by_field() {
        let config = parse_config(
            r##"
            [source]
            sheet = "Mapping"

            [output]
            path = "out/coverage.png"

            [render]
            aggregation = "First"
            cell_width = 5000

            [colors.scope]
            in_scope = "#008080"
            out_of_scope = "#404040"
            text = "white"
            "##,
            VisualConfig::default(),
        )
        .unwrap();

        assert_eq!(config.source.sheet, "Mapping");
        assert_eq!(config.source.path, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(config.output, PathBuf::from("out/coverage.png"));
        assert_eq!(config.render.layout, Layout::Split);
        assert_eq!(config.render.aggregation, AggregationPolicy::First);
        assert_eq!(config.render.cell_width, 400, "clamped");
        assert_eq!(config.colors.scope.text, Rgb::WHITE);
    }

    #[test]
    fn color_lookup_requires_fallback() {
        let err = parse_config(
            r##"
            [colors.objects]
            entries = [{ label = "EVSE", color = "#ffdd57" }]
            "##,
            VisualConfig::default(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn unknown_keys_and_bad_colors_are_rejected() {
        assert!(parse_config("[render]\nzoom = 2\n", VisualConfig::default()).is_err());
        assert!(
            parse_config("[render]\nbackground = \"#zzzzzz\"\n", VisualConfig::default())
                .is_err()
        );
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucvis.toml");
        std::fs::write(&path, "[render]\nlayout = \"Panels\"\n").unwrap();
        let config = load_config(&path, VisualConfig::default()).unwrap();
        assert_eq!(config.render.layout, Layout::Panels);
        assert!(load_config(&dir.path().join("absent.toml"), VisualConfig::default()).is_err());
    }

    #[test]
    fn sample_config_reproduces_split_preset() {
        let sample = include_str!("../../../config/ucvis.toml");
        let config = parse_config(sample, VisualConfig::preset(Preset::Panels)).unwrap();
        assert_eq!(config, VisualConfig::preset(Preset::Split));
    }
}
