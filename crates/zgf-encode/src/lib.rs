/// Encodeur de Graphic Field ZPL pour zgf.
///
/// Converts any `PixelSource` into a monochrome, bit-packed `^GF` field:
/// plain hex, raw binary, or RLE-compressed hex.
pub mod field;
pub mod hex;
pub mod mono;
pub mod rle;
pub mod zpl;

pub use field::{GraphicField, convert_to_graphic_field, flatten_image};
pub use rle::compress_ascii;
pub use zpl::{FieldOrigin, convert_to_zpl, convert_to_zpl_at};
