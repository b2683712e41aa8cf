//! # VIA LIVRE Renderer
//!
//! Software rasterizer for the logo. Shapes from the core crate are painted
//! onto an RGBA [`Canvas`] backed by `image::RgbaImage`, and padded maskable
//! variants are composited with source-over blending.

pub mod canvas;
pub mod logo;

pub use canvas::{Canvas, PaintMode};
pub use logo::{
    logo_shapes, maskable_canvas_size, pad_centered, render_logo, render_maskable,
    LogoRasterizer, Rasterizer, RenderError, BADGE_BLUE,
};
