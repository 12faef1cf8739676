use anyhow::{Context, Result};
use clap::Parser;
use uc_core::config::{Preset, VisualConfig};
use uc_source::SheetSource;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Résoudre la config : preset < fichier < overrides CLI
    let config = resolve_config(&cli)?;

    // 4. Source tableur
    let mut source = SheetSource::new(&config.source.path, &config.source.sheet);

    // 5. Pipeline complet
    let summary = pipeline::run(&config, &mut source)?;
    println!(
        "{} ({}×{} px, {} enregistrements, {} cas d'usage × {} catégories)",
        summary.output.display(),
        summary.width,
        summary.height,
        summary.records,
        summary.rows,
        summary.columns
    );
    Ok(())
}

/// Preset (défaut : split), puis fichier `--config`, puis options CLI.
fn resolve_config(cli: &cli::Cli) -> Result<VisualConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => name.parse::<Preset>()?,
        None => Preset::default(),
    };
    let mut config = VisualConfig::preset(preset);

    if let Some(ref path) = cli.config {
        config = uc_core::config::load_config(path, config)
            .with_context(|| format!("Config inutilisable : {}", path.display()))?;
    }

    if let Some(ref input) = cli.input {
        config.source.path.clone_from(input);
    }
    if let Some(ref sheet) = cli.sheet {
        config.source.sheet.clone_from(sheet);
    }
    if let Some(ref output) = cli.output {
        config.output.clone_from(output);
    }
    log::debug!(
        "Config : {} [{}] → {}",
        config.source.path.display(),
        config.source.sheet,
        config.output.display()
    );
    Ok(config)
}
