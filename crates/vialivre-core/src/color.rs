use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Composite `self` over `dst` (Porter-Duff source-over) in integer math.
    ///
    /// Exact when either side is fully transparent or the source is opaque,
    /// so pasting onto an empty canvas reproduces the source bit for bit.
    pub fn over(self, dst: Color) -> Color {
        if self.a == 0 {
            return dst;
        }
        if self.a == 255 || dst.a == 0 {
            return self;
        }

        let sa = self.a as u32;
        let da = dst.a as u32;
        // Output alpha scaled by 255, exact.
        let weight_src = sa * 255;
        let weight_dst = da * (255 - sa);
        let total = weight_src + weight_dst;

        let mix = |s: u8, d: u8| -> u8 {
            let num = s as u32 * weight_src + d as u32 * weight_dst;
            ((num + total / 2) / total).min(255) as u8
        };

        Color::rgba(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            ((total + 127) / 255).min(255) as u8,
        )
    }
}
