/// Types partagés, capacité pixel et configuration pour zgf.
///
/// This crate holds the pixel sample model, the color flattener, the
/// `PixelSource` capability and the encode configuration shared by the
/// rest of the workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use color::{Gray16, PixelSample};
pub use config::{EncodeConfig, GraphicType};
pub use error::CoreError;
pub use frame::{FrameBuffer, GrayFrame};
pub use traits::PixelSource;
