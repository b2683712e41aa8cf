//! The VIA LIVRE logo: a blue badge with a road, a dashed centerline and an
//! orange warning pin. Every coordinate is a fixed ratio of the target size.

use thiserror::Error;
use vialivre_core::{Color, Ellipse, Point, Polygon, Rect, Shape};

use crate::canvas::{Canvas, PaintMode};

/// Badge blue, `#0175C2`.
pub const BADGE_BLUE: Color = Color::rgb(1, 117, 194);
/// Pin orange, `#FF6B35`.
pub const PIN_ORANGE: Color = Color::rgb(255, 107, 53);
pub const ROAD_WHITE: Color = Color::rgba(255, 255, 255, 230);
pub const PIN_SHADOW: Color = Color::rgba(0, 0, 0, 50);
pub const PIN_HIGHLIGHT: Color = Color::rgba(255, 255, 255, 80);
pub const MARK_WHITE: Color = Color::rgb(255, 255, 255);

/// Number of fading discs drawn under the badge.
pub const FADE_STEPS: i64 = 10;
const FADE_SPAN: i64 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Logo size must be a positive number of pixels, got {0}")]
    InvalidSize(u32),
}

/// Produces a square logo raster for a requested pixel size.
pub trait Rasterizer {
    fn rasterize(&self, size: u32) -> Result<Canvas, RenderError>;
}

/// The production rasterizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoRasterizer;

impl Rasterizer for LogoRasterizer {
    fn rasterize(&self, size: u32) -> Result<Canvas, RenderError> {
        render_logo(size)
    }
}

/// `trunc(size * ratio)`.
fn scaled(size: i64, ratio: f64) -> i64 {
    (size as f64 * ratio) as i64
}

fn rect(fill: Color, x0: i64, y0: i64, x1: i64, y1: i64) -> Shape {
    Shape::Rect(Rect::new(fill, x0 as f64, y0 as f64, x1 as f64, y1 as f64))
}

fn ellipse(fill: Color, x0: i64, y0: i64, x1: i64, y1: i64) -> Shape {
    Shape::Ellipse(Ellipse::new(fill, x0 as f64, y0 as f64, x1 as f64, y1 as f64))
}

fn polygon(fill: Color, points: &[(i64, i64)]) -> Shape {
    Shape::Polygon(Polygon::new(
        fill,
        points
            .iter()
            .map(|&(x, y)| Point::new(x as f64, y as f64))
            .collect(),
    ))
}

/// The logo's draw list for `size`, back to front.
pub fn logo_shapes(size: u32) -> Vec<Shape> {
    let size = size as i64;
    let center = size / 2;
    let mut shapes = Vec::new();

    // Badge
    let radius = scaled(size, 0.47);
    for step in 0..FADE_STEPS {
        let i = radius - 2 * step;
        if i < 0 {
            break;
        }
        let fade = 1.0 - (radius - i) as f64 / FADE_SPAN as f64;
        let alpha = (255.0 * fade) as u8;
        shapes.push(ellipse(
            BADGE_BLUE.with_alpha(alpha),
            center - i,
            center - i,
            center + i,
            center + i,
        ));
    }
    shapes.push(ellipse(
        BADGE_BLUE,
        center - radius,
        center - radius,
        center + radius,
        center + radius,
    ));

    // Road
    let road_width = scaled(size, 0.47);
    let road_height = scaled(size, 0.16);
    let road_x = center - road_width / 2;
    let road_y = center - road_height / 2;
    shapes.push(rect(
        ROAD_WHITE,
        road_x,
        road_y,
        road_x + road_width,
        road_y + road_height,
    ));

    // Dashed centerline
    let line_y = center;
    let dash = scaled(size, 0.04);
    let gap = scaled(size, 0.02);
    let stroke = (size / 128).max(2);
    let stroke_top = line_y - stroke / 2;
    if dash > 0 {
        let mut x = road_x + dash;
        while x < road_x + road_width - dash {
            shapes.push(rect(BADGE_BLUE, x, stroke_top, x + dash, stroke_top + stroke - 1));
            x += dash + gap;
        }
    }

    // Markers along the road
    let mark = (size / 64).max(3);
    let reach = scaled(size, 0.31);
    for offset in [-reach, 0, reach] {
        shapes.push(ellipse(
            BADGE_BLUE,
            center + offset - mark,
            line_y - mark,
            center + offset + mark,
            line_y + mark,
        ));
    }

    // Pin
    let pin_top = scaled(size, 0.39);
    let pin_bottom = scaled(size, 0.59);
    let pin_width = scaled(size, 0.16);
    let pin_x = center;

    let shadow_y = pin_bottom + scaled(size, 0.05);
    let shadow_w = scaled(size, 0.1);
    let shadow_h = scaled(size, 0.03);
    shapes.push(ellipse(
        PIN_SHADOW,
        pin_x - shadow_w,
        shadow_y - shadow_h,
        pin_x + shadow_w,
        shadow_y + shadow_h,
    ));

    let shoulder_y = pin_bottom - scaled(size, 0.06);
    shapes.push(polygon(
        PIN_ORANGE,
        &[
            (pin_x, pin_top),
            (pin_x - pin_width / 2, shoulder_y),
            (pin_x, pin_bottom),
            (pin_x + pin_width / 2, shoulder_y),
        ],
    ));

    let highlight = scaled(size, 0.06);
    let highlight_x = pin_x - scaled(size, 0.03);
    let highlight_y = pin_top + scaled(size, 0.02);
    shapes.push(ellipse(
        PIN_HIGHLIGHT,
        highlight_x - highlight / 2,
        highlight_y - highlight / 2,
        highlight_x + highlight / 2,
        highlight_y + highlight / 2,
    ));

    // Exclamation mark
    let stem_half = (size / 128).max(2);
    let mark_top = pin_top + scaled(size, 0.05);
    let dot = scaled(size, 0.02);
    shapes.push(polygon(
        MARK_WHITE,
        &[
            (pin_x, mark_top),
            (pin_x - dot, mark_top + dot * 2),
            (pin_x + dot, mark_top + dot * 2),
        ],
    ));
    let stem_top = mark_top + dot * 2 + 2;
    shapes.push(rect(
        MARK_WHITE,
        pin_x - stem_half,
        stem_top,
        pin_x + stem_half,
        stem_top + scaled(size, 0.04),
    ));

    shapes
}

/// Rasterize the logo onto a transparent `size`×`size` canvas.
pub fn render_logo(size: u32) -> Result<Canvas, RenderError> {
    if size == 0 {
        return Err(RenderError::InvalidSize(size));
    }
    let shapes = logo_shapes(size);
    log::debug!("Rendering logo at {}px from {} shapes", size, shapes.len());

    let mut canvas = Canvas::new(size, size);
    for shape in &shapes {
        canvas.fill_shape(shape, PaintMode::Replace);
    }
    Ok(canvas)
}

/// Side of the padded canvas for a maskable icon: `round(size * padding)`.
pub fn maskable_canvas_size(size: u32, padding: f64) -> u32 {
    (size as f64 * padding).round() as u32
}

/// Center `logo` on a transparent square canvas of side `canvas_size`.
pub fn pad_centered(logo: &Canvas, canvas_size: u32) -> Canvas {
    let mut padded = Canvas::new(canvas_size, canvas_size);
    let offset_x = (canvas_size as i64 - logo.width() as i64) / 2;
    let offset_y = (canvas_size as i64 - logo.height() as i64) / 2;
    padded.paste(logo, offset_x, offset_y);
    padded
}

/// Rasterize `size` and pad it into a maskable icon.
pub fn render_maskable<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    size: u32,
    padding: f64,
) -> Result<Canvas, RenderError> {
    let logo = rasterizer.rasterize(size)?;
    Ok(pad_centered(&logo, maskable_canvas_size(size, padding)))
}
