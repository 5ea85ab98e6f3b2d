use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Origine de champ maximale acceptée par l'imprimante (`^FO`).
pub const MAX_FIELD_ORIGIN: u32 = 32000;

/// Format de données du Graphic Field.
///
/// # Example
/// ```
/// use zgf_core::config::GraphicType;
/// let t: GraphicType = "binary".parse().unwrap();
/// assert_eq!(t, GraphicType::Binary);
/// assert_eq!(t.format_letter(), 'B');
/// assert_eq!(GraphicType::CompressedAscii.format_letter(), 'A');
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GraphicType {
    /// Hexadécimal brut, une ligne par rangée.
    #[serde(rename = "ASCII", alias = "Ascii")]
    Ascii,
    /// Octets bruts.
    Binary,
    /// Hexadécimal compressé RLE, avec rangées dupliquées élidées.
    #[default]
    #[serde(rename = "CompressedASCII", alias = "CompressedAscii")]
    CompressedAscii,
}

impl GraphicType {
    /// Lettre de format écrite dans l'en-tête `^GF`.
    #[must_use]
    pub fn format_letter(self) -> char {
        match self {
            Self::Binary => 'B',
            Self::Ascii | Self::CompressedAscii => 'A',
        }
    }

    /// True for the text encodings (ASCII and CompressedASCII).
    #[must_use]
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl fmt::Display for GraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ascii => "ASCII",
            Self::Binary => "Binary",
            Self::CompressedAscii => "CompressedASCII",
        };
        f.write_str(name)
    }
}

impl FromStr for GraphicType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "a" => Ok(Self::Ascii),
            "binary" | "b" => Ok(Self::Binary),
            "compressed" | "compressedascii" | "z" => Ok(Self::CompressedAscii),
            _ => Err(CoreError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Configuration complète de l'encodage.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use zgf_core::config::{EncodeConfig, GraphicType};
/// let config = EncodeConfig::default();
/// assert_eq!(config.graphic_type, GraphicType::CompressedAscii);
/// assert!(config.wrap_label);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncodeConfig {
    // === Champ ===
    /// Format du Graphic Field.
    pub graphic_type: GraphicType,
    /// Origine X du champ (`^FO`), en points.
    pub origin_x: u32,
    /// Origine Y du champ (`^FO`), en points.
    pub origin_y: u32,
    /// Encadrer le champ par `^XA` / `^XZ`. false = `^GF` seul.
    pub wrap_label: bool,

    // === Source ===
    /// Largeur cible en points. `None` = taille native.
    pub target_width: Option<u32>,
    /// Aplatir en niveaux de gris 16 bits avant l'encodage.
    pub flatten: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            graphic_type: GraphicType::CompressedAscii,
            origin_x: 0,
            origin_y: 0,
            wrap_label: true,
            target_width: None,
            flatten: false,
        }
    }
}

impl EncodeConfig {
    /// Normalise les valeurs hors domaine.
    pub fn clamp_all(&mut self) {
        if self.target_width == Some(0) {
            log::warn!("target_width = 0 ignoré, taille native conservée.");
            self.target_width = None;
        }
    }

    /// Validate values the printer would reject.
    ///
    /// # Errors
    /// Returns `CoreError::Config` if a field origin exceeds [`MAX_FIELD_ORIGIN`].
    ///
    /// # Example
    /// ```
    /// use zgf_core::config::EncodeConfig;
    /// let mut config = EncodeConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.origin_x = 40_000;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, v) in [("origin_x", self.origin_x), ("origin_y", self.origin_y)] {
            if v > MAX_FIELD_ORIGIN {
                return Err(CoreError::Config(format!(
                    "{name} = {v} dépasse {MAX_FIELD_ORIGIN}"
                )));
            }
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    field: Option<FieldSection>,
    source: Option<SourceSection>,
}

/// Field section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct FieldSection {
    graphic_type: Option<GraphicType>,
    origin_x: Option<u32>,
    origin_y: Option<u32>,
    wrap_label: Option<bool>,
}

/// Source section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct SourceSection {
    target_width: Option<u32>,
    flatten: Option<bool>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value is out of range.
///
/// # Example
/// ```
/// use zgf_core::config::{GraphicType, parse_config};
/// let config = parse_config("[field]\ngraphic_type = \"ASCII\"\norigin_x = 30\n").unwrap();
/// assert_eq!(config.graphic_type, GraphicType::Ascii);
/// assert_eq!(config.origin_x, 30);
/// assert_eq!(config.origin_y, 0);
/// ```
pub fn parse_config(content: &str) -> Result<EncodeConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = EncodeConfig::default();

    if let Some(f) = file.field {
        if let Some(v) = f.graphic_type {
            config.graphic_type = v;
        }
        if let Some(v) = f.origin_x {
            config.origin_x = v;
        }
        if let Some(v) = f.origin_y {
            config.origin_y = v;
        }
        if let Some(v) = f.wrap_label {
            config.wrap_label = v;
        }
    }

    if let Some(s) = file.source {
        if let Some(v) = s.target_width {
            config.target_width = Some(v);
        }
        if let Some(v) = s.flatten {
            config.flatten = v;
        }
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use zgf_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<EncodeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::info!("Config chargée depuis {}", path.display());
    Ok(config)
}
