/// Sources d'images pour zgf : décodage via `image`, redimensionnement.

pub mod image;
pub mod resize;

pub use crate::image::{ImageView, Raster, load_image};
pub use resize::{resize_to_width, scaled_height};
