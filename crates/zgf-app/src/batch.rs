use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use zgf_core::config::EncodeConfig;

use crate::convert::convert_file;

/// Extensions reconnues en mode lots.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Bilan d'un traitement par lots.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Fichiers .zpl écrits.
    pub written: Vec<PathBuf>,
    /// Images en échec, avec le message d'erreur.
    pub failed: Vec<(PathBuf, String)>,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Liste triée des images d'un dossier (non récursif).
///
/// # Errors
/// Returns an error if the folder cannot be read.
pub fn collect_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(folder)
        .with_context(|| format!("Impossible de lire le dossier {}", folder.display()))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    images.sort();
    Ok(images)
}

/// Fichier `.zpl` de chaque image, dans l'ordre de `images`.
///
/// `<stem>.zpl` par défaut ; un stem partagé par plusieurs images garde
/// l'extension (`label.png.zpl`, `label.bmp.zpl`).
fn plan_targets(images: &[PathBuf], out_dir: &Path) -> Vec<(PathBuf, PathBuf)> {
    let mut stems: HashMap<&OsStr, usize> = HashMap::new();
    for path in images {
        *stems.entry(path.file_stem().unwrap_or_default()).or_default() += 1;
    }

    images
        .iter()
        .map(|path| {
            let stem = path.file_stem().unwrap_or_default();
            let mut name = if stems.get(stem).copied().unwrap_or(0) > 1 {
                path.file_name().unwrap_or(stem).to_os_string()
            } else {
                stem.to_os_string()
            };
            name.push(".zpl");
            (path.clone(), out_dir.join(name))
        })
        .collect()
}

fn convert_one(path: &Path, target: &Path, config: &EncodeConfig) -> Result<()> {
    let zpl = convert_file(path, config)?;
    std::fs::write(target, zpl)
        .with_context(|| format!("Impossible d'écrire {}", target.display()))
}

/// Convertit toutes les images de `folder`, en parallèle.
///
/// Chaque image produit un fichier `.zpl` dans `out_dir` (défaut : `folder`).
/// Une image en échec n'interrompt pas les autres. Deux images qui
/// viseraient le même fichier sont toutes deux en échec, rien n'est écrasé.
///
/// # Errors
/// Returns an error if the folder cannot be read, contains no image,
/// or the output folder cannot be created.
pub fn run_batch(
    folder: &Path,
    out_dir: Option<&Path>,
    config: &EncodeConfig,
) -> Result<BatchReport> {
    let images = collect_images(folder)?;
    if images.is_empty() {
        anyhow::bail!("Aucune image trouvée dans {}", folder.display());
    }

    let out_dir = out_dir.unwrap_or(folder);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Impossible de créer {}", out_dir.display()))?;

    log::info!(
        "Traitement par lots : {} images → {}",
        images.len(),
        out_dir.display()
    );

    let plan = plan_targets(&images, out_dir);
    let mut claims: HashMap<&Path, usize> = HashMap::new();
    for (_, target) in &plan {
        *claims.entry(target.as_path()).or_default() += 1;
    }
    let (jobs, clashes): (Vec<_>, Vec<_>) = plan
        .iter()
        .partition(|(_, target)| claims.get(target.as_path()) == Some(&1));

    let mut report = BatchReport::default();
    for (path, target) in clashes {
        let msg = format!("{} visé par plusieurs images", target.display());
        log::warn!("Ignoré {} : {msg}", path.display());
        report.failed.push((path.clone(), msg));
    }

    let results: Vec<(&PathBuf, &PathBuf, Result<()>)> = jobs
        .par_iter()
        .map(|(path, target)| (path, target, convert_one(path, target, config)))
        .collect();

    for (path, target, result) in results {
        match result {
            Ok(()) => report.written.push(target.clone()),
            Err(e) => {
                log::warn!("Échec pour {} : {e:#}", path.display());
                report.failed.push((path.clone(), format!("{e:#}")));
            }
        }
    }
    Ok(report)
}
