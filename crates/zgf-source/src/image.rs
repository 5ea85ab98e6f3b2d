use std::path::Path;

use ::image::{
    DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, RgbImage,
    Rgba, RgbaImage,
};
use anyhow::{Context, Result};
use zgf_core::color::PixelSample;
use zgf_core::frame::FrameBuffer;
use zgf_core::traits::PixelSource;

/// Niveaux de gris 16 bits.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;
/// Niveaux de gris + alpha 16 bits.
pub type GrayAlpha16Image = ImageBuffer<LumaA<u16>, Vec<u16>>;
/// RGB 16 bits.
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;
/// RGBA 16 bits.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Conversion d'un pixel `image` en échantillon pré-multiplié 16 bits.
pub trait ToSample {
    /// Échantillon équivalent.
    fn to_sample(&self) -> PixelSample;
}

impl ToSample for Luma<u8> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [v] = self.0;
        PixelSample::from_nrgba8(v, v, v, u8::MAX)
    }
}

impl ToSample for LumaA<u8> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [v, a] = self.0;
        PixelSample::from_nrgba8(v, v, v, a)
    }
}

impl ToSample for Rgb<u8> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [r, g, b] = self.0;
        PixelSample::from_nrgba8(r, g, b, u8::MAX)
    }
}

impl ToSample for Rgba<u8> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [r, g, b, a] = self.0;
        PixelSample::from_nrgba8(r, g, b, a)
    }
}

impl ToSample for Luma<u16> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [v] = self.0;
        PixelSample::new(v, v, v, u16::MAX)
    }
}

impl ToSample for LumaA<u16> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [v, a] = self.0;
        PixelSample::from_nrgba16(v, v, v, a)
    }
}

impl ToSample for Rgb<u16> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [r, g, b] = self.0;
        PixelSample::new(r, g, b, u16::MAX)
    }
}

impl ToSample for Rgba<u16> {
    #[inline(always)]
    fn to_sample(&self) -> PixelSample {
        let [r, g, b, a] = self.0;
        PixelSample::from_nrgba16(r, g, b, a)
    }
}

/// Vue `PixelSource` sur un `ImageBuffer` concret, sans copie.
///
/// # Example
/// ```
/// use image::{Rgb, RgbImage};
/// use zgf_core::traits::PixelSource;
/// use zgf_source::image::ImageView;
///
/// let img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
/// let view = ImageView(&img);
/// assert_eq!(view.dimensions(), (3, 2));
/// assert_eq!(view.sample(0, 0).a, 0xffff);
/// ```
pub struct ImageView<'a, P: Pixel>(pub &'a ImageBuffer<P, Vec<P::Subpixel>>);

impl<P: Pixel + ToSample> PixelSource for ImageView<'_, P> {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    #[inline(always)]
    fn sample(&self, x: u32, y: u32) -> PixelSample {
        self.0.get_pixel(x, y).to_sample()
    }
}

/// Image décodée, une variante par disposition mémoire.
///
/// Les formats flottants sont normalisés en RGBA 16 bits au chargement,
/// la lecture d'un pixel ne fait donc qu'un `match` sur un buffer concret.
///
/// # Example
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use zgf_core::traits::PixelSource;
/// use zgf_source::image::Raster;
///
/// let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
/// let raster = Raster::from(img);
/// assert_eq!(raster.dimensions(), (4, 4));
/// assert_eq!(raster.sample(1, 1).r, 0);
/// ```
#[derive(Clone, Debug)]
pub enum Raster {
    /// Gris 8 bits.
    Luma8(GrayImage),
    /// Gris + alpha 8 bits.
    LumaA8(GrayAlphaImage),
    /// RGB 8 bits.
    Rgb8(RgbImage),
    /// RGBA 8 bits.
    Rgba8(RgbaImage),
    /// Gris 16 bits.
    Luma16(Gray16Image),
    /// Gris + alpha 16 bits.
    LumaA16(GrayAlpha16Image),
    /// RGB 16 bits.
    Rgb16(Rgb16Image),
    /// RGBA 16 bits.
    Rgba16(Rgba16Image),
}

impl From<DynamicImage> for Raster {
    fn from(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(b) => Self::Luma8(b),
            DynamicImage::ImageLumaA8(b) => Self::LumaA8(b),
            DynamicImage::ImageRgb8(b) => Self::Rgb8(b),
            DynamicImage::ImageRgba8(b) => Self::Rgba8(b),
            DynamicImage::ImageLuma16(b) => Self::Luma16(b),
            DynamicImage::ImageLumaA16(b) => Self::LumaA16(b),
            DynamicImage::ImageRgb16(b) => Self::Rgb16(b),
            DynamicImage::ImageRgba16(b) => Self::Rgba16(b),
            other => Self::Rgba16(other.to_rgba16()),
        }
    }
}

impl Raster {
    /// Nom court de la disposition mémoire, pour les logs.
    #[must_use]
    pub fn layout(&self) -> &'static str {
        match self {
            Self::Luma8(_) => "L8",
            Self::LumaA8(_) => "LA8",
            Self::Rgb8(_) => "RGB8",
            Self::Rgba8(_) => "RGBA8",
            Self::Luma16(_) => "L16",
            Self::LumaA16(_) => "LA16",
            Self::Rgb16(_) => "RGB16",
            Self::Rgba16(_) => "RGBA16",
        }
    }

    fn to_dynamic(&self) -> DynamicImage {
        match self {
            Self::Luma8(b) => DynamicImage::ImageLuma8(b.clone()),
            Self::LumaA8(b) => DynamicImage::ImageLumaA8(b.clone()),
            Self::Rgb8(b) => DynamicImage::ImageRgb8(b.clone()),
            Self::Rgba8(b) => DynamicImage::ImageRgba8(b.clone()),
            Self::Luma16(b) => DynamicImage::ImageLuma16(b.clone()),
            Self::LumaA16(b) => DynamicImage::ImageLumaA16(b.clone()),
            Self::Rgb16(b) => DynamicImage::ImageRgb16(b.clone()),
            Self::Rgba16(b) => DynamicImage::ImageRgba16(b.clone()),
        }
    }

    /// Copie RGBA 8 bits, pour le redimensionnement. DO NOT use in hot path.
    ///
    /// # Example
    /// ```
    /// use image::{DynamicImage, Rgb, RgbImage};
    /// use zgf_source::image::Raster;
    ///
    /// let img = RgbImage::from_pixel(2, 1, Rgb([9, 8, 7]));
    /// let raster = Raster::from(DynamicImage::ImageRgb8(img));
    /// let frame = raster.to_frame();
    /// assert_eq!(frame.pixel(1, 0), (9, 8, 7, 255));
    /// ```
    #[must_use]
    pub fn to_frame(&self) -> FrameBuffer {
        let rgba = self.to_dynamic().to_rgba8();
        let (width, height) = rgba.dimensions();
        FrameBuffer {
            data: rgba.into_raw(),
            width,
            height,
        }
    }
}

impl PixelSource for Raster {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Luma8(b) => b.dimensions(),
            Self::LumaA8(b) => b.dimensions(),
            Self::Rgb8(b) => b.dimensions(),
            Self::Rgba8(b) => b.dimensions(),
            Self::Luma16(b) => b.dimensions(),
            Self::LumaA16(b) => b.dimensions(),
            Self::Rgb16(b) => b.dimensions(),
            Self::Rgba16(b) => b.dimensions(),
        }
    }

    #[inline(always)]
    fn sample(&self, x: u32, y: u32) -> PixelSample {
        match self {
            Self::Luma8(b) => b.get_pixel(x, y).to_sample(),
            Self::LumaA8(b) => b.get_pixel(x, y).to_sample(),
            Self::Rgb8(b) => b.get_pixel(x, y).to_sample(),
            Self::Rgba8(b) => b.get_pixel(x, y).to_sample(),
            Self::Luma16(b) => b.get_pixel(x, y).to_sample(),
            Self::LumaA16(b) => b.get_pixel(x, y).to_sample(),
            Self::Rgb16(b) => b.get_pixel(x, y).to_sample(),
            Self::Rgba16(b) => b.get_pixel(x, y).to_sample(),
        }
    }
}

/// Charge une image depuis le disque (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use zgf_source::image::load_image;
/// use std::path::Path;
/// let raster = load_image(Path::new("label.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<Raster> {
    let img = ::image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let raster = Raster::from(img);
    log::info!(
        "Image chargée : {} ({}×{}, {})",
        path.display(),
        raster.dimensions().0,
        raster.dimensions().1,
        raster.layout()
    );
    Ok(raster)
}

/// Décode une image déjà en mémoire.
///
/// # Errors
/// Returns an error if the bytes are not a supported image format.
pub fn load_from_memory(bytes: &[u8]) -> Result<Raster> {
    let img = ::image::load_from_memory(bytes).context("Impossible de décoder l'image")?;
    Ok(Raster::from(img))
}
