pub mod cache;
pub mod canvas;
pub mod surface;

pub use cache::{TextureCache, TextureKey, TextureSlot};
pub use canvas::{ColorStop, Pixmap, Rgba};
pub use surface::TextureConfig;
