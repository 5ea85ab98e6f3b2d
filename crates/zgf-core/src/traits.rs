use crate::color::PixelSample;

/// Grille de pixels adressable, source de l'encodage.
///
/// Implémenté par : `FrameBuffer`, `GrayFrame`, et côté `zgf-source` par
/// `Raster` et `ImageView`. L'encodeur est générique sur ce trait, la
/// lecture d'un pixel est donc résolue statiquement.
///
/// # Example
/// ```
/// use zgf_core::traits::PixelSource;
/// use zgf_core::color::PixelSample;
///
/// struct Checker;
/// impl PixelSource for Checker {
///     fn dimensions(&self) -> (u32, u32) { (2, 2) }
///     fn sample(&self, x: u32, y: u32) -> PixelSample {
///         if (x + y) % 2 == 0 { PixelSample::BLACK } else { PixelSample::WHITE }
///     }
/// }
/// assert_eq!(Checker.dimensions(), (2, 2));
/// ```
pub trait PixelSource {
    /// Dimensions en pixels (largeur, hauteur).
    fn dimensions(&self) -> (u32, u32);

    /// Échantillon pré-multiplié 16 bits au pixel (x, y).
    ///
    /// CONTRAT : `x < width` et `y < height`.
    fn sample(&self, x: u32, y: u32) -> PixelSample;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    #[inline(always)]
    fn sample(&self, x: u32, y: u32) -> PixelSample {
        (**self).sample(x, y)
    }
}
