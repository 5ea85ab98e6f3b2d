use std::path::PathBuf;

use clap::Parser;
use zgf_core::config::{EncodeConfig, GraphicType};

/// zgf : convertit des images en Graphic Field ZPL (^GF).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Dossier d'images à convertir par lots, un fichier .zpl par image.
    #[arg(long)]
    pub batch_folder: Option<PathBuf>,

    /// Fichier de sortie (mode image) ou dossier de sortie (mode lots).
    /// Défaut : stdout, ou le dossier source en mode lots.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Format du champ : ascii, binary, compressed.
    #[arg(long)]
    pub mode: Option<String>,

    /// Largeur cible en points (redimensionnement, ratio conservé).
    #[arg(long)]
    pub width: Option<u32>,

    /// Aplatir en niveaux de gris avant l'encodage.
    #[arg(long, default_value_t = false)]
    pub flatten: bool,

    /// Émettre le ^GF seul, sans ^XA/^FO/^XZ.
    #[arg(long, default_value_t = false)]
    pub field_only: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that exactly one source is provided.
    ///
    /// # Errors
    /// Returns an error if zero or more than one source is specified.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        match (self.image.is_some(), self.batch_folder.is_some()) {
            (false, false) => {
                anyhow::bail!("Aucune source spécifiée. Utilisez --image ou --batch-folder.")
            }
            (true, true) => {
                anyhow::bail!("Une seule source à la fois : --image OU --batch-folder.")
            }
            _ => Ok(()),
        }
    }

    /// Applique les overrides CLI sur la configuration chargée.
    pub fn apply_overrides(&self, config: &mut EncodeConfig) {
        if let Some(ref mode) = self.mode {
            match mode.parse::<GraphicType>() {
                Ok(t) => config.graphic_type = t,
                Err(e) => log::warn!("{e}, utilisation de {}.", config.graphic_type),
            }
        }
        if let Some(width) = self.width {
            config.target_width = Some(width);
        }
        if self.flatten {
            config.flatten = true;
        }
        if self.field_only {
            config.wrap_label = false;
        }
        config.clamp_all();
    }
}
