use anyhow::{Context, Result, bail};
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use zgf_core::frame::FrameBuffer;

/// Hauteur conservant le ratio pour une largeur cible, au moins 1.
///
/// # Example
/// ```
/// use zgf_source::resize::scaled_height;
/// assert_eq!(scaled_height(400, 300, 812), 609);
/// assert_eq!(scaled_height(1000, 1, 10), 1);
/// ```
#[must_use]
pub fn scaled_height(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    let w = u64::from(src_width.max(1));
    let h = (u64::from(src_height) * u64::from(target_width) + w / 2) / w;
    h.clamp(1, u64::from(u32::MAX)) as u32
}

/// Redimensionne à la largeur d'impression `width` (en points), ratio conservé.
///
/// La source est lue en place ; seule l'image de sortie est allouée.
/// À largeur égale, la source est simplement copiée.
///
/// # Errors
/// Returns an error if the source or target is empty, or the resize fails.
///
/// # Example
/// ```
/// use zgf_source::resize::resize_to_width;
/// use zgf_core::frame::FrameBuffer;
/// let dst = resize_to_width(&FrameBuffer::new(200, 100), 812).unwrap();
/// assert_eq!((dst.width, dst.height), (812, 406));
/// ```
pub fn resize_to_width(src: &FrameBuffer, width: u32) -> Result<FrameBuffer> {
    if src.width == 0 || src.height == 0 || width == 0 {
        bail!(
            "Redimensionnement impossible : {}×{} vers largeur {width}",
            src.width,
            src.height
        );
    }
    if src.width == width {
        return Ok(src.clone());
    }

    let height = scaled_height(src.width, src.height, width);
    log::debug!(
        "Redimensionnement {}×{} → {width}×{height}",
        src.width,
        src.height
    );

    let src_view = ImageRef::new(src.width, src.height, &src.data, PixelType::U8x4)
        .context("Dimensions source invalides")?;
    let mut dst = Image::new(width, height, PixelType::U8x4);
    Resizer::new()
        .resize(&src_view, &mut dst, &ResizeOptions::new())
        .context("Échec du redimensionnement")?;

    Ok(FrameBuffer {
        data: dst.into_vec(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_width_is_a_copy() {
        let mut src = FrameBuffer::new(3, 3);
        src.set_pixel(1, 1, (1, 2, 3, 4));
        let dst = resize_to_width(&src, 3).unwrap();
        assert_eq!((dst.width, dst.height), (3, 3));
        assert_eq!(dst.data, src.data);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let mut src = FrameBuffer::new(64, 32);
        src.data.fill(255);
        let dst = resize_to_width(&src, 16).unwrap();
        assert_eq!((dst.width, dst.height), (16, 8));
        assert_eq!(dst.data.len(), 16 * 8 * 4);
        assert!(dst.data.iter().all(|&v| v >= 250));
    }

    #[test]
    fn upscale_keeps_ratio() {
        let src = FrameBuffer::new(203, 101);
        let dst = resize_to_width(&src, 812).unwrap();
        assert_eq!((dst.width, dst.height), (812, 404));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(resize_to_width(&FrameBuffer::new(0, 10), 100).is_err());
        assert!(resize_to_width(&FrameBuffer::new(10, 10), 0).is_err());
    }
}
