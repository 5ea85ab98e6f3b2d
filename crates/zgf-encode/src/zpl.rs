use zgf_core::config::GraphicType;
use zgf_core::traits::PixelSource;

use crate::field::{GraphicField, convert_to_graphic_field};

/// Début d'étiquette et séparateur de champ.
pub const LABEL_START: &str = "^XA,^FS\n";

/// Fin de champ et fin d'étiquette.
pub const LABEL_END: &str = "^FS,^XZ\n";

/// Origine du champ (`^FO`), en points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldOrigin {
    /// Horizontal offset.
    pub x: u32,
    /// Vertical offset.
    pub y: u32,
}

impl FieldOrigin {
    /// Build an origin.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Encadre un Graphic Field dans une étiquette ZPL complète.
///
/// # Example
/// ```
/// use zgf_core::config::GraphicType;
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::field::convert_to_graphic_field;
/// use zgf_encode::zpl::{FieldOrigin, wrap_field};
///
/// let field = convert_to_graphic_field(&FrameBuffer::new(8, 1), GraphicType::Ascii);
/// let label = wrap_field(&field, FieldOrigin::new(10, 20));
/// assert_eq!(label, b"^XA,^FS\n^FO10,20\n^GFA,3,1,1,\nFF\n^FS,^XZ\n");
/// ```
#[must_use]
pub fn wrap_field(field: &GraphicField, origin: FieldOrigin) -> Vec<u8> {
    let prologue = format!("{LABEL_START}^FO{},{}\n", origin.x, origin.y);
    let mut out = Vec::with_capacity(prologue.len() + field.encoded_len() + 64);
    out.extend_from_slice(prologue.as_bytes());
    out.extend_from_slice(&field.to_bytes());
    out.extend_from_slice(LABEL_END.as_bytes());
    out
}

/// Convertit une image en étiquette ZPL, champ placé en (0, 0).
///
/// # Example
/// ```
/// use zgf_core::config::GraphicType;
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::zpl::convert_to_zpl;
///
/// let mut fb = FrameBuffer::new(16, 2);
/// fb.data.fill(255);
/// let zpl = convert_to_zpl(&fb, GraphicType::CompressedAscii);
/// assert_eq!(zpl, b"^XA,^FS\n^FO0,0\n^GFA,2,4,2,\n,:^FS,^XZ\n");
/// ```
#[must_use]
pub fn convert_to_zpl<S: PixelSource + ?Sized>(src: &S, graphic_type: GraphicType) -> Vec<u8> {
    convert_to_zpl_at(src, graphic_type, FieldOrigin::default())
}

/// Comme [`convert_to_zpl`], avec une origine de champ explicite.
#[must_use]
pub fn convert_to_zpl_at<S: PixelSource + ?Sized>(
    src: &S,
    graphic_type: GraphicType,
    origin: FieldOrigin,
) -> Vec<u8> {
    wrap_field(&convert_to_graphic_field(src, graphic_type), origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zgf_core::frame::FrameBuffer;

    #[test]
    fn binary_label_keeps_raw_bytes() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.set_pixel(0, 0, (255, 255, 255, 255));
        let zpl = convert_to_zpl(&fb, GraphicType::Binary);
        let mut expected = b"^XA,^FS\n^FO0,0\n^GFB,1,1,1,\n".to_vec();
        expected.push(0x7f);
        expected.extend_from_slice(b"^FS,^XZ\n");
        assert_eq!(zpl, expected);
    }

    #[test]
    fn origin_is_written() {
        let fb = FrameBuffer::new(0, 0);
        let zpl = convert_to_zpl_at(&fb, GraphicType::Ascii, FieldOrigin::new(300, 7));
        assert_eq!(zpl, b"^XA,^FS\n^FO300,7\n^GFA,0,0,0,\n^FS,^XZ\n");
    }
}
