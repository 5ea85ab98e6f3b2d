use crate::color::PixelSample;
use crate::error::CoreError;
use crate::traits::PixelSource;

/// Buffer de pixels RGBA 8 bits, alpha non pré-multiplié.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use zgf_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use zgf_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if `data.len() != width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use zgf_core::frame::FrameBuffer;
    /// assert!(FrameBuffer::from_raw(vec![0; 8], 2, 1).is_ok());
    /// assert!(FrameBuffer::from_raw(vec![0; 7], 2, 1).is_err());
    /// ```
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use zgf_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use zgf_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 2);
    /// fb.set_pixel(1, 1, (255, 0, 0, 255));
    /// assert_eq!(fb.pixel(1, 1), (255, 0, 0, 255));
    /// ```
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, (r, g, b, a): (u8, u8, u8, u8)) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
    }
}

impl PixelSource for FrameBuffer {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline(always)]
    fn sample(&self, x: u32, y: u32) -> PixelSample {
        let (r, g, b, a) = self.pixel(x, y);
        PixelSample::from_nrgba8(r, g, b, a)
    }
}

/// Image en niveaux de gris 16 bits, résultat de l'aplatissement.
///
/// # Example
/// ```
/// use zgf_core::frame::GrayFrame;
/// let mut g = GrayFrame::new(3, 2);
/// g.set(2, 1, 0x8000);
/// assert_eq!(g.get(2, 1), 0x8000);
/// assert_eq!(g.data.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    /// Luminance, row-major.
    pub data: Vec<u16>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl GrayFrame {
    /// Crée une image noire aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u16; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Luminance at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set luminance at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: u16) {
        self.data[y as usize * self.width as usize + x as usize] = value;
    }
}

impl PixelSource for GrayFrame {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline(always)]
    fn sample(&self, x: u32, y: u32) -> PixelSample {
        let v = self.get(x, y);
        PixelSample::new(v, v, v, 0xffff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_samples_are_premultiplied() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.set_pixel(0, 0, (255, 255, 255, 255));
        fb.set_pixel(1, 0, (255, 255, 255, 0));
        assert_eq!(fb.sample(0, 0), PixelSample::WHITE);
        assert_eq!(fb.sample(1, 0), PixelSample::new(0, 0, 0, 0));
    }

    #[test]
    fn gray_frame_is_opaque() {
        let mut g = GrayFrame::new(1, 1);
        g.set(0, 0, 0x1234);
        assert_eq!(g.sample(0, 0), PixelSample::new(0x1234, 0x1234, 0x1234, 0xffff));
        assert_eq!(g.dimensions(), (1, 1));
    }

    #[test]
    fn from_raw_rejects_bad_length() {
        let err = FrameBuffer::from_raw(vec![0; 10], 2, 2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimensions { width: 2, height: 2 }));
    }
}
