//! Photomosaic
//!
//! Turns an image into a grid of solid-color tiles and renders the grid as a
//! mosaic. Sampling lives in the `mosaic-tiles` crate; this crate adds tile
//! resolution, compositing and the HTTP/CLI surfaces.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
