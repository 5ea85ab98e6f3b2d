use std::sync::LazyLock;

/// Échantillon RGBA, chaque canal sur 16 bits [0, 0xffff], pré-multiplié par l'alpha.
///
/// # Example
/// ```
/// use zgf_core::color::PixelSample;
/// let px = PixelSample::from_nrgba8(255, 0, 0, 128);
/// assert_eq!(px.a, 128 * 0x101);
/// assert_eq!(px.r, 128 * 0x101);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSample {
    /// Rouge pré-multiplié.
    pub r: u16,
    /// Vert pré-multiplié.
    pub g: u16,
    /// Bleu pré-multiplié.
    pub b: u16,
    /// Alpha.
    pub a: u16,
}

impl PixelSample {
    /// Blanc opaque.
    pub const WHITE: Self = Self::new(0xffff, 0xffff, 0xffff, 0xffff);
    /// Noir opaque.
    pub const BLACK: Self = Self::new(0, 0, 0, 0xffff);

    /// Build a sample from already premultiplied 16-bit channels.
    #[must_use]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Convertit un pixel 8 bits à alpha non pré-multiplié.
    ///
    /// Chaque canal est étendu sur 16 bits (`c * 0x101`) puis pondéré par l'alpha.
    ///
    /// # Example
    /// ```
    /// use zgf_core::color::PixelSample;
    /// assert_eq!(PixelSample::from_nrgba8(255, 255, 255, 255), PixelSample::WHITE);
    /// assert_eq!(PixelSample::from_nrgba8(10, 20, 30, 0), PixelSample::new(0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn from_nrgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a = u32::from(a);
        let mul = |c: u8| (u32::from(c) * 0x101 * a / 0xff) as u16;
        Self {
            r: mul(r),
            g: mul(g),
            b: mul(b),
            a: (a * 0x101) as u16,
        }
    }

    /// Convertit un pixel 16 bits à alpha non pré-multiplié.
    ///
    /// # Example
    /// ```
    /// use zgf_core::color::PixelSample;
    /// let px = PixelSample::from_nrgba16(0xffff, 0x8000, 0, 0x8000);
    /// assert_eq!(px, PixelSample::new(0x8000, 0x4000, 0, 0x8000));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn from_nrgba16(r: u16, g: u16, b: u16, a: u16) -> Self {
        let a32 = u32::from(a);
        let mul = |c: u16| (u32::from(c) * a32 / 0xffff) as u16;
        Self {
            r: mul(r),
            g: mul(g),
            b: mul(b),
            a,
        }
    }
}

/// Luminance 16 bits produite par l'aplatissement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gray16(pub u16);

/// Luminance of opaque white, computed once.
pub static WHITE: LazyLock<Gray16> = LazyLock::new(|| flatten(PixelSample::WHITE));

/// Luminance of opaque black, computed once.
pub static BLACK: LazyLock<Gray16> = LazyLock::new(|| flatten(PixelSample::BLACK));

#[inline(always)]
fn whiteish(v: u16) -> bool {
    v > 0xff00
}

#[inline(always)]
fn blackish(v: u16) -> bool {
    v < 0x00ff
}

/// Chemin rapide : blanc ou noir quasi saturé sur les quatre canaux.
///
/// Retourne `None` si l'échantillon demande le calcul complet.
///
/// # Example
/// ```
/// use zgf_core::color::{PixelSample, WHITE, shortcircuit};
/// assert_eq!(shortcircuit(PixelSample::WHITE), Some(*WHITE));
/// assert_eq!(shortcircuit(PixelSample::new(0x8000, 0x8000, 0x8000, 0xffff)), None);
/// ```
#[inline(always)]
#[must_use]
pub fn shortcircuit(px: PixelSample) -> Option<Gray16> {
    if whiteish(px.r) && whiteish(px.g) && whiteish(px.b) && whiteish(px.a) {
        return Some(*WHITE);
    }
    if blackish(px.r) && blackish(px.g) && blackish(px.b) && blackish(px.a) {
        return Some(*BLACK);
    }
    None
}

/// JFIF luma weights on 16-bit channels. 19595 + 38470 + 7471 = 65536.
#[inline(always)]
#[must_use]
pub fn luma16(r: u32, g: u32, b: u32) -> Gray16 {
    let y = (19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16;
    Gray16(y as u16)
}

/// Aplatit un échantillon en luminance, sans chemin rapide.
///
/// Le fond blanc implicite est combiné à chaque canal par OU binaire
/// (`val | round(c * alpha)`), pas par addition. Le résultat doit rester
/// identique bit à bit.
///
/// # Example
/// ```
/// use zgf_core::color::{Gray16, PixelSample, flatten};
/// assert_eq!(flatten(PixelSample::new(0x1234, 0x1234, 0x1234, 0xffff)), Gray16(0x1234));
/// // Entièrement transparent : le fond blanc domine.
/// assert_eq!(flatten(PixelSample::new(0, 0, 0, 0)), Gray16(0xffff));
/// ```
#[must_use]
pub fn flatten(px: PixelSample) -> Gray16 {
    let alpha = f32::from(px.a) / 65535.0;
    let val = 0xffff - (65535.0 * alpha).round() as u32;
    let composite = |c: u16| val | (f32::from(c) * alpha).round() as u32;
    luma16(composite(px.r), composite(px.g), composite(px.b))
}

/// Luminance d'un échantillon, chemin rapide compris.
///
/// # Example
/// ```
/// use zgf_core::color::{BLACK, PixelSample, WHITE, to_gray};
/// assert_eq!(to_gray(PixelSample::WHITE), *WHITE);
/// assert_eq!(to_gray(PixelSample::BLACK), *BLACK);
/// ```
#[inline(always)]
#[must_use]
pub fn to_gray(px: PixelSample) -> Gray16 {
    shortcircuit(px).unwrap_or_else(|| flatten(px))
}
