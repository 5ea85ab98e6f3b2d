use zgf_core::color::{Gray16, to_gray};
use zgf_core::traits::PixelSource;

/// Seuil noir/blanc : mi-course de la luminance 16 bits.
pub const THRESHOLD: u16 = 0x8000;

/// Un pixel est noir (bit à 1) si sa luminance est sous le seuil.
///
/// # Example
/// ```
/// use zgf_core::color::Gray16;
/// use zgf_encode::mono::is_black;
/// assert!(is_black(Gray16(0x7fff)));
/// assert!(!is_black(Gray16(0x8000)));
/// ```
#[inline(always)]
#[must_use]
pub fn is_black(lum: Gray16) -> bool {
    lum.0 < THRESHOLD
}

/// Octets par rangée : `ceil(width / 8)`.
///
/// # Example
/// ```
/// use zgf_encode::mono::row_bytes;
/// assert_eq!(row_bytes(1), 1);
/// assert_eq!(row_bytes(8), 1);
/// assert_eq!(row_bytes(9), 2);
/// ```
#[inline(always)]
#[must_use]
pub fn row_bytes(width: u32) -> usize {
    width.div_ceil(8) as usize
}

/// Pack row `y` of `src` into `row`, MSB first, 1 = black.
///
/// `row` must hold `row_bytes(width)` bytes. Padding bits of the last byte stay 0.
///
/// # Example
/// ```
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::mono::pack_row;
///
/// let mut fb = FrameBuffer::new(10, 1);
/// for x in 0..10 {
///     let v = if x == 0 || x == 9 { 0 } else { 255 };
///     fb.set_pixel(x, 0, (v, v, v, 255));
/// }
/// let mut row = [0u8; 2];
/// pack_row(&fb, 0, &mut row);
/// assert_eq!(row, [0x80, 0x40]);
/// ```
pub fn pack_row<S: PixelSource + ?Sized>(src: &S, y: u32, row: &mut [u8]) {
    let (width, _) = src.dimensions();
    debug_assert_eq!(row.len(), row_bytes(width), "row buffer size");
    row.fill(0);
    for x in 0..width {
        if is_black(to_gray(src.sample(x, y))) {
            row[(x / 8) as usize] |= 0x80 >> (x % 8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zgf_core::frame::GrayFrame;

    fn gray_row(values: &[u16]) -> GrayFrame {
        let mut g = GrayFrame::new(values.len() as u32, 1);
        for (x, &v) in values.iter().enumerate() {
            g.set(x as u32, 0, v);
        }
        g
    }

    #[test]
    fn bits_are_msb_first() {
        let mut values = [0xffffu16; 8];
        values[0] = 0;
        values[7] = 0;
        let mut row = [0u8; 1];
        pack_row(&gray_row(&values), 0, &mut row);
        assert_eq!(row, [0x81]);
    }

    #[test]
    fn trailing_partial_byte_is_kept_and_padded() {
        let values = [0u16; 11];
        let mut row = [0u8; 2];
        pack_row(&gray_row(&values), 0, &mut row);
        assert_eq!(row, [0xff, 0xe0]);
    }

    #[test]
    fn threshold_boundary() {
        let mut row = [0u8; 1];
        pack_row(&gray_row(&[0x7fff, 0x8000, 0x8001]), 0, &mut row);
        assert_eq!(row, [0x80]);
    }

    #[test]
    fn stale_row_content_is_cleared() {
        let mut row = [0xffu8; 1];
        pack_row(&gray_row(&[0xffff; 4]), 0, &mut row);
        assert_eq!(row, [0x00]);
    }

    #[test]
    fn row_width_is_ceil_div_8() {
        assert_eq!(row_bytes(0), 0);
        assert_eq!(row_bytes(7), 1);
        assert_eq!(row_bytes(16), 2);
        assert_eq!(row_bytes(17), 3);
    }
}
