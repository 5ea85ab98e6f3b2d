use std::io::{self, Write};

use zgf_core::color::to_gray;
use zgf_core::config::GraphicType;
use zgf_core::frame::GrayFrame;
use zgf_core::traits::PixelSource;

use crate::mono::{pack_row, row_bytes};
use crate::rle::{REPEAT_ROW, compress_ascii};

/// Graphic Field encodé : corps et paramètres d'en-tête `^GF`.
///
/// # Example
/// ```
/// use zgf_core::config::GraphicType;
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::field::convert_to_graphic_field;
///
/// let field = convert_to_graphic_field(&FrameBuffer::new(16, 2), GraphicType::Ascii);
/// // Pixels transparents noirs : chemin rapide noir.
/// assert_eq!(field.as_text(), Some("FFFF\nFFFF\n"));
/// assert_eq!(field.header(), "^GFA,10,4,2,\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphicField {
    /// Format des données.
    pub graphic_type: GraphicType,
    /// Corps encodé (texte ASCII ou octets bruts).
    pub body: Vec<u8>,
    /// Octets décompressés : `row_bytes * height`.
    pub total_bytes: usize,
    /// Octets par rangée.
    pub row_bytes: usize,
}

impl GraphicField {
    /// Nombre d'octets du corps tel qu'émis.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.body.len()
    }

    /// En-tête `^GF<A|B>,<encoded>,<total>,<row>,\n`.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "^GF{},{},{},{},\n",
            self.graphic_type.format_letter(),
            self.encoded_len(),
            self.total_bytes,
            self.row_bytes
        )
    }

    /// Corps sous forme de texte, pour les formats ASCII.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if !self.graphic_type.is_text() {
            return None;
        }
        std::str::from_utf8(&self.body).ok()
    }

    /// En-tête suivi du corps.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = self.header();
        let mut out = Vec::with_capacity(header.len() + self.body.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    /// Write header and body to `dst`.
    ///
    /// # Errors
    /// Propagates any I/O error from `dst`.
    pub fn write_to<W: Write>(&self, dst: &mut W) -> io::Result<()> {
        dst.write_all(self.header().as_bytes())?;
        dst.write_all(&self.body)
    }
}

/// Convertit une image en Graphic Field ZPL.
///
/// Chaque rangée est seuillée puis émise selon `graphic_type` : hexadécimal
/// suivi d'un saut de ligne, octets bruts, ou hexadécimal compressé avec `:`
/// à la place d'une rangée compressée identique à la précédente.
/// Une image vide donne un champ vide bien formé.
///
/// # Example
/// ```
/// use zgf_core::config::GraphicType;
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::field::convert_to_graphic_field;
///
/// let mut fb = FrameBuffer::new(16, 3);
/// fb.data.fill(255);
/// let field = convert_to_graphic_field(&fb, GraphicType::CompressedAscii);
/// assert_eq!(field.as_text(), Some(",::"));
/// assert_eq!(field.total_bytes, 6);
/// ```
pub fn convert_to_graphic_field<S: PixelSource + ?Sized>(
    src: &S,
    graphic_type: GraphicType,
) -> GraphicField {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return GraphicField {
            graphic_type,
            body: Vec::new(),
            total_bytes: 0,
            row_bytes: 0,
        };
    }

    let stride = row_bytes(width);
    let mut body = Vec::with_capacity(8 * 1024);
    let mut line = vec![0u8; stride];
    let mut compressed = String::with_capacity(stride * 2);
    let mut last_line: Option<String> = None;

    for y in 0..height {
        pack_row(src, y, &mut line);

        match graphic_type {
            GraphicType::Ascii => {
                body.extend_from_slice(crate::hex::encode_row(&line).as_bytes());
                body.push(b'\n');
            }
            GraphicType::Binary => body.extend_from_slice(&line),
            GraphicType::CompressedAscii => {
                compressed.clear();
                compress_ascii(&mut compressed, &crate::hex::encode_row(&line));
                if last_line.as_deref() == Some(compressed.as_str()) {
                    body.push(REPEAT_ROW as u8);
                } else {
                    body.extend_from_slice(compressed.as_bytes());
                    match last_line.as_mut() {
                        Some(prev) => {
                            prev.clear();
                            prev.push_str(&compressed);
                        }
                        None => last_line = Some(compressed.clone()),
                    }
                }
            }
        }
    }

    let total_bytes = stride * height as usize;
    log::debug!(
        "^GF{} {width}×{height} : {} octets encodés pour {total_bytes} décompressés",
        graphic_type.format_letter(),
        body.len()
    );

    GraphicField {
        graphic_type,
        body,
        total_bytes,
        row_bytes: stride,
    }
}

/// Aplatit une image en niveaux de gris 16 bits.
///
/// L'encodage de l'image aplatie produit exactement le même champ que
/// l'image d'origine.
///
/// # Example
/// ```
/// use zgf_core::frame::FrameBuffer;
/// use zgf_encode::field::flatten_image;
///
/// let mut fb = FrameBuffer::new(2, 1);
/// fb.set_pixel(0, 0, (255, 255, 255, 255));
/// fb.set_pixel(1, 0, (0, 0, 0, 255));
/// let gray = flatten_image(&fb);
/// assert_eq!(gray.data, vec![0xffff, 0]);
/// ```
#[must_use]
pub fn flatten_image<S: PixelSource + ?Sized>(src: &S) -> GrayFrame {
    let (width, height) = src.dimensions();
    let mut target = GrayFrame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            target.set(x, y, to_gray(src.sample(x, y)).0);
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use zgf_core::frame::FrameBuffer;

    /// `#` noir, `.` blanc.
    fn frame(rows: &[&str]) -> FrameBuffer {
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut fb = FrameBuffer::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let v = if ch == '#' { 0 } else { 255 };
                fb.set_pixel(x as u32, y as u32, (v, v, v, 255));
            }
        }
        fb
    }

    #[test]
    fn ascii_rows_end_with_newline() {
        let fb = frame(&["############", "#..........#"]);
        let field = convert_to_graphic_field(&fb, GraphicType::Ascii);
        assert_eq!(field.as_text(), Some("FFF0\n8010\n"));
        assert_eq!(field.header(), "^GFA,10,4,2,\n");
    }

    #[test]
    fn binary_body_is_raw_bytes() {
        let fb = frame(&["#.......#", "........."]);
        let field = convert_to_graphic_field(&fb, GraphicType::Binary);
        assert_eq!(field.body, vec![0x80, 0x80, 0x00, 0x00]);
        assert_eq!(field.header(), "^GFB,4,4,2,\n");
        assert_eq!(field.as_text(), None);
    }

    #[test]
    fn compressed_rows_and_duplicates() {
        let fb = frame(&[
            "................",
            "................",
            "########........",
        ]);
        let field = convert_to_graphic_field(&fb, GraphicType::CompressedAscii);
        assert_eq!(field.as_text(), Some(",:FF00"));
        assert_eq!(field.header(), "^GFA,6,6,2,\n");
    }

    #[test]
    fn duplicate_marker_only_for_consecutive_rows() {
        let black = "#".repeat(48);
        let mostly = format!("{}{}", "#".repeat(40), ".".repeat(8));
        let (b, m) = (black.as_str(), mostly.as_str());
        let fb = frame(&[b, m, m, b, m]);
        let field = convert_to_graphic_field(&fb, GraphicType::CompressedAscii);
        assert_eq!(field.as_text(), Some("!PF00:!PF00"));
        assert_eq!(field.total_bytes, 30);
        assert_eq!(field.row_bytes, 6);
    }

    #[test]
    fn total_bytes_independent_of_mode() {
        let fb = frame(&["#.#.#.#.#.#", "###########", "..........."]);
        for t in [GraphicType::Ascii, GraphicType::Binary, GraphicType::CompressedAscii] {
            let field = convert_to_graphic_field(&fb, t);
            assert_eq!(field.total_bytes, 6, "{t}");
            assert_eq!(field.row_bytes, 2, "{t}");
        }
    }

    #[test]
    fn empty_image_gives_empty_field() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let field = convert_to_graphic_field(&FrameBuffer::new(w, h), GraphicType::Ascii);
            assert_eq!(field.header(), "^GFA,0,0,0,\n");
            assert!(field.body.is_empty());
        }
        let field = convert_to_graphic_field(&FrameBuffer::new(0, 3), GraphicType::Binary);
        assert_eq!(field.header(), "^GFB,0,0,0,\n");
    }

    #[test]
    fn flattened_image_encodes_identically() {
        let mut fb = frame(&["#..#..##.", "..##..#.#"]);
        fb.set_pixel(4, 0, (120, 200, 30, 128));
        fb.set_pixel(5, 1, (10, 10, 240, 200));
        let gray = flatten_image(&fb);
        for t in [GraphicType::Ascii, GraphicType::Binary, GraphicType::CompressedAscii] {
            assert_eq!(
                convert_to_graphic_field(&fb, t),
                convert_to_graphic_field(&gray, t)
            );
        }
    }

    #[test]
    fn write_to_matches_to_bytes() {
        let field = convert_to_graphic_field(&frame(&["#.#.#.#."]), GraphicType::Binary);
        let mut sink = Vec::new();
        field.write_to(&mut sink).unwrap();
        assert_eq!(sink, field.to_bytes());
        assert_eq!(&sink[..12], b"^GFB,1,1,1,\n");
        assert_eq!(sink[12], 0xaa);
    }
}
