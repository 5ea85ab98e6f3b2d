use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use zgf_core::config::EncodeConfig;

pub mod batch;
pub mod cli;
pub mod convert;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Conversion par lots
    if let Some(folder) = cli.batch_folder.as_deref() {
        let report = batch::run_batch(folder, cli.output.as_deref(), &config)?;
        log::info!("{} fichiers .zpl écrits", report.written.len());
        if !report.failed.is_empty() {
            anyhow::bail!(
                "{} image(s) en échec sur {}",
                report.failed.len(),
                report.failed.len() + report.written.len()
            );
        }
        return Ok(());
    }

    // 5. Image unique
    let Some(image) = cli.image.as_deref() else {
        return Ok(());
    };
    let zpl = convert::convert_file(image, &config)?;

    match cli.output.as_deref() {
        Some(path) => std::fs::write(path, &zpl)
            .with_context(|| format!("Impossible d'écrire {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&zpl)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Config TOML si présente, sinon défauts.
fn resolve_config(cli: &cli::Cli) -> Result<EncodeConfig> {
    if cli.config.exists() {
        zgf_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(EncodeConfig::default())
    }
}
