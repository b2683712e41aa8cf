//! # VIA LIVRE Core
//!
//! Geometry primitives and RGBA color math shared by the logo renderer.
//! Shapes carry their own fill color and are painted in draw-list order.

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{BBox, Ellipse, Point, Polygon, Rect, Shape};
