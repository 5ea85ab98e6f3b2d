use std::path::Path;

use anyhow::Result;
use zgf_core::config::EncodeConfig;
use zgf_core::traits::PixelSource;
use zgf_encode::field::{convert_to_graphic_field, flatten_image};
use zgf_encode::zpl::{FieldOrigin, wrap_field};
use zgf_source::image::load_image;
use zgf_source::resize::resize_to_width;

/// Encode une source selon la configuration : champ seul ou étiquette complète.
pub fn encode_source<S: PixelSource + ?Sized>(src: &S, config: &EncodeConfig) -> Vec<u8> {
    let field = if config.flatten {
        convert_to_graphic_field(&flatten_image(src), config.graphic_type)
    } else {
        convert_to_graphic_field(src, config.graphic_type)
    };

    if config.wrap_label {
        wrap_field(&field, FieldOrigin::new(config.origin_x, config.origin_y))
    } else {
        field.to_bytes()
    }
}

/// Charge, redimensionne si demandé, puis encode une image.
///
/// # Errors
/// Returns an error if the image cannot be loaded or resized.
pub fn convert_file(path: &Path, config: &EncodeConfig) -> Result<Vec<u8>> {
    let raster = load_image(path)?;
    let out = match config.target_width {
        Some(width) => {
            let frame = resize_to_width(&raster.to_frame(), width)?;
            encode_source(&frame, config)
        }
        None => encode_source(&raster, config),
    };
    log::info!("{} : {} octets ZPL", path.display(), out.len());
    Ok(out)
}
