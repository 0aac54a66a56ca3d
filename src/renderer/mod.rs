//! CPU rendering module
//!
//! Paints the simulation into an off-screen frame buffer. The observation
//! buffer is refreshed from that frame buffer only, so it reflects whatever
//! frame was drawn last.

pub mod font;
pub mod frame;
pub mod observation;
pub mod software;
pub mod surface;

pub use font::BitmapFont;
pub use frame::{FrameBuffer, Rgb, colors};
pub use observation::Observation;
pub use software::{Assets, Renderer, SoftwareRenderer};
pub use surface::{DisplaySurface, PngSurface, encode_png};
