use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A 2D point in canvas coordinates (pixels, origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// A filled rectangle. Corners are inclusive pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub fill: Color,
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    pub fn new(fill: Color, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            fill,
            top_left: Point::new(x1.min(x2), y1.min(y2)),
            bottom_right: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.top_left, self.bottom_right)
    }
}

/// A filled ellipse described by its inclusive pixel bounding box.
///
/// A box `[x0, y0, x1, y1]` covers the pixels `x0..=x1`, so the continuous
/// ellipse spans `[x0, x1 + 1] × [y0, y1 + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub fill: Color,
    pub bounds: BBox,
}

impl Ellipse {
    pub fn new(fill: Color, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            fill,
            bounds: BBox::new(
                Point::new(x1.min(x2), y1.min(y2)),
                Point::new(x1.max(x2), y1.max(y2)),
            ),
        }
    }

    pub fn bbox(&self) -> BBox {
        self.bounds
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.bounds.min.x + self.bounds.max.x + 1.0) / 2.0,
            (self.bounds.min.y + self.bounds.max.y + 1.0) / 2.0,
        )
    }

    /// Horizontal and vertical semi-axes.
    pub fn radii(&self) -> (f64, f64) {
        ((self.bounds.width() + 1.0) / 2.0, (self.bounds.height() + 1.0) / 2.0)
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        let c = self.center();
        let (rx, ry) = self.radii();
        let dx = (p.x - c.x) / rx;
        let dy = (p.y - c.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// A filled polygon defined by a list of vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub fill: Color,
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(fill: Color, vertices: Vec<Point>) -> Self {
        Self { fill, vertices }
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.vertices)
    }

    /// X coordinates where the horizontal line at `y` crosses the outline,
    /// sorted ascending. Edges are half-open in y so shared vertices count once.
    pub fn scanline_crossings(&self, y: f64) -> Vec<f64> {
        let n = self.vertices.len();
        let mut xs = Vec::new();
        if n < 3 {
            return xs;
        }
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y <= y && y < b.y) || (b.y <= y && y < a.y) {
                let t = (y - a.y) / (b.y - a.y);
                xs.push(a.x + t * (b.x - a.x));
            }
        }
        xs.sort_by(|l, r| l.total_cmp(r));
        xs
    }
}

/// A fillable shape in a draw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(Rect),
    Ellipse(Ellipse),
    Polygon(Polygon),
}

impl Shape {
    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Shape::Rect(r) => Some(r.bbox()),
            Shape::Ellipse(e) => Some(e.bbox()),
            Shape::Polygon(p) => p.bbox(),
        }
    }

    pub fn fill(&self) -> Color {
        match self {
            Shape::Rect(r) => r.fill,
            Shape::Ellipse(e) => e.fill,
            Shape::Polygon(p) => p.fill,
        }
    }
}
