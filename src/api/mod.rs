pub mod color;
pub mod mosaic;

pub use color::{handle_color, SwatchQuery, __path_handle_color};
pub use mosaic::{handle_mosaic_grid, handle_mosaic_render, MosaicGridResponse};
pub use mosaic::{__path_handle_mosaic_grid, __path_handle_mosaic_render};
