use image::{Rgba, RgbaImage};
use vialivre_core::{BBox, Color, Ellipse, Point, Polygon, Rect, Shape};

/// How a shape's fill is combined with the pixels already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// The covered pixel takes the fill color verbatim, alpha included.
    Replace,
    /// Porter-Duff source-over.
    SourceOver,
}

/// An RGBA pixel buffer, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// A canvas uniformly filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(color.to_array())),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> BBox {
        BBox::new(
            Point::new(0.0, 0.0),
            Point::new(self.width() as f64 - 1.0, self.height() as f64 - 1.0),
        )
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from_array(self.image.get_pixel(x, y).0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn paint(&mut self, x: i64, y: i64, color: Color, mode: PaintMode) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        let out = match mode {
            PaintMode::Replace => color,
            PaintMode::SourceOver => color.over(Color::from_array(px.0)),
        };
        *px = Rgba(out.to_array());
    }

    /// Inclusive pixel range `[lo, hi]` clipped to `0..len`.
    fn clip(lo: i64, hi: i64, len: u32) -> Option<(i64, i64)> {
        let lo = lo.max(0);
        let hi = hi.min(len as i64 - 1);
        (lo <= hi).then_some((lo, hi))
    }

    pub fn fill_shape(&mut self, shape: &Shape, mode: PaintMode) {
        match shape {
            Shape::Rect(r) => self.fill_rect(r, mode),
            Shape::Ellipse(e) => self.fill_ellipse(e, mode),
            Shape::Polygon(p) => self.fill_polygon(p, mode),
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect, mode: PaintMode) {
        let Some((x0, x1)) = Self::clip(
            rect.top_left.x.floor() as i64,
            rect.bottom_right.x.floor() as i64,
            self.width(),
        ) else {
            return;
        };
        let Some((y0, y1)) = Self::clip(
            rect.top_left.y.floor() as i64,
            rect.bottom_right.y.floor() as i64,
            self.height(),
        ) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.paint(x, y, rect.fill, mode);
            }
        }
    }

    /// Covers every pixel whose center lies inside the ellipse.
    pub fn fill_ellipse(&mut self, ellipse: &Ellipse, mode: PaintMode) {
        let bbox = ellipse.bbox();
        if !bbox.intersects(&self.bounds()) {
            return;
        }
        let Some((x0, x1)) = Self::clip(
            bbox.min.x.floor() as i64,
            bbox.max.x.ceil() as i64,
            self.width(),
        ) else {
            return;
        };
        let Some((y0, y1)) = Self::clip(
            bbox.min.y.floor() as i64,
            bbox.max.y.ceil() as i64,
            self.height(),
        ) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if ellipse.contains_point(&center) {
                    self.paint(x, y, ellipse.fill, mode);
                }
            }
        }
    }

    /// Scanline fill sampling pixel centers, even-odd rule.
    pub fn fill_polygon(&mut self, polygon: &Polygon, mode: PaintMode) {
        let Some(bbox) = polygon.bbox() else {
            return;
        };
        let Some((y0, y1)) = Self::clip(
            bbox.min.y.floor() as i64,
            bbox.max.y.ceil() as i64,
            self.height(),
        ) else {
            return;
        };
        for y in y0..=y1 {
            let crossings = polygon.scanline_crossings(y as f64 + 0.5);
            for span in crossings.chunks_exact(2) {
                // Pixel x is covered when x + 0.5 lies in [span[0], span[1]).
                let first = (span[0] - 0.5).ceil() as i64;
                let last = (span[1] - 0.5).ceil() as i64 - 1;
                if let Some((x0, x1)) = Self::clip(first, last, self.width()) {
                    for x in x0..=x1 {
                        self.paint(x, y, polygon.fill, mode);
                    }
                }
            }
        }
    }

    /// Composite `src` onto this canvas with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, src: &Canvas, x: i64, y: i64) {
        for (sx, sy, p) in src.image.enumerate_pixels() {
            self.paint(
                x + sx as i64,
                y + sy as i64,
                Color::from_array(p.0),
                PaintMode::SourceOver,
            );
        }
    }
}

#[cfg(test)]
impl Canvas {
    pub(crate) fn is_fully_transparent(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub(crate) fn coverage(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] != 0).count()
    }
}
