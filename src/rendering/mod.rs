pub mod compose;
pub mod encode;
pub mod swatch;

pub use compose::{compose_image, compose_png};
pub use swatch::render_swatch_png;
