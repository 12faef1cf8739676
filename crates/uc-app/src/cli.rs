use std::path::PathBuf;

use clap::Parser;

/// ucvis — Heatmap de couverture des champs OCPI par cas d'usage.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML, appliqué par-dessus le preset.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preset de départ : "split" (cellules coupées) ou "panels" (deux grilles).
    #[arg(long)]
    pub preset: Option<String>,

    /// Classeur source (xlsx, xlsm, xls, ods).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Nom de la feuille de correspondance.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Fichier PNG de sortie.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
