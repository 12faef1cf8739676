use std::path::PathBuf;

use anyhow::{Context, Result};
use uc_core::config::VisualConfig;
use uc_core::pivot::PivotGrid;
use uc_core::traits::RecordSource;
use uc_export::export_png;
use uc_render::{Typeface, render_figure};

/// Bilan d'une exécution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub rows: usize,
    pub columns: usize,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

/// Chargement → statut → pivot → rendu → export PNG.
///
/// # Errors
/// Retourne la première erreur rencontrée ; aucun fichier n'est écrit si le
/// rendu échoue.
pub fn run<S: RecordSource>(config: &VisualConfig, source: &mut S) -> Result<RunSummary> {
    let origin = source.describe();
    log::info!("Lecture de {origin}");
    let records = source
        .load()
        .with_context(|| format!("Lecture impossible : {origin}"))?;
    log::info!("{} enregistrement(s) chargé(s)", records.len());

    let grid = PivotGrid::build(&records, config.render.aggregation);
    let (rows, columns) = grid.dimensions();
    log::info!(
        "Pivot : {rows} cas d'usage × {columns} catégories ({:?})",
        config.render.aggregation
    );

    let face = Typeface::load(config.render.font_path.as_deref())?;
    if let Some(path) = face.source() {
        log::info!("Police : {}", path.display());
    }
    let fb = render_figure(&grid, config, &face).context("Rendu de la figure impossible")?;

    export_png(&fb, &config.output)
        .with_context(|| format!("Export impossible vers {}", config.output.display()))?;

    Ok(RunSummary {
        records: records.len(),
        rows,
        columns,
        width: fb.width,
        height: fb.height,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uc_core::config::Preset;
    use uc_core::record::MappingRecord;
    use uc_core::traits::MemorySource;
    use uc_render::RenderError;

    fn records() -> Vec<MappingRecord> {
        vec![
            MappingRecord::new("UC1", "Utilisation")
                .with_object_field("Energy")
                .with_object("EVSE")
                .with_scope_flag("Y"),
            MappingRecord::new("UC1", "Pricing")
                .with_object_field("N/A")
                .with_scope_flag("Y"),
            MappingRecord::new("UC2", "Location")
                .with_object_field("coordinates")
                .with_object("Session")
                .with_scope_flag("N"),
        ]
    }

    fn config_into(dir: &tempfile::TempDir, preset: Preset) -> VisualConfig {
        let mut config = VisualConfig::preset(preset);
        config.output = dir.path().join("figure.png");
        config
    }

    #[test]
    fn split_preset_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_into(&dir, Preset::Split);
        let summary = run(&config, &mut MemorySource::new(records())).unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!((summary.rows, summary.columns), (2, 3));
        let png = image::open(&summary.output).unwrap();
        assert_eq!((png.width(), png.height()), (summary.width, summary.height));
    }

    #[test]
    fn panels_preset_is_wider_than_split() {
        let dir = tempfile::tempdir().unwrap();
        let split = run(
            &config_into(&dir, Preset::Split),
            &mut MemorySource::new(records()),
        )
        .unwrap();
        let panels = run(
            &config_into(&dir, Preset::Panels),
            &mut MemorySource::new(records()),
        )
        .unwrap();
        // Deux grilles côte à côte.
        assert!(panels.width > split.width);
    }

    #[test]
    fn empty_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_into(&dir, Preset::Split);
        let err = run(&config, &mut MemorySource::new(Vec::new())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenderError>(),
            Some(RenderError::EmptyGrid { .. })
        ));
        assert!(!config.output.exists());
    }
}
