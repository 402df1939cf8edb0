use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color. Puzzle logic compares colors with [`Color::same_rgb`]; alpha is carried
/// only so that packed ARGB records round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks `0xAARRGGBB` stored in a signed 32-bit integer.
    pub const fn from_argb(packed: i32) -> Self {
        let v = packed as u32;
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    pub const fn to_argb(self) -> i32 {
        (((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32)
            as i32
    }

    pub const fn same_rgb(self, other: Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Sort/grouping key that ignores alpha.
    pub const fn rgb_key(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Corner colors of a gradient, in the order levels are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_right: Color,
    pub bottom_left: Color,
}

impl Corners {
    pub const fn new(top_left: Color, top_right: Color, bottom_right: Color, bottom_left: Color) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn to_array(self) -> [Color; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// Color of cell `(col, row)` in a `width x height` gradient.
    ///
    /// A dimension of 1 samples the top/left edge instead of dividing by zero.
    pub fn cell(&self, col: usize, row: usize, width: usize, height: usize) -> Color {
        let x = if width > 1 {
            col as f64 / (width - 1) as f64
        } else {
            0.0
        };
        let y = if height > 1 {
            row as f64 / (height - 1) as f64
        } else {
            0.0
        };
        blerp(self.top_left, self.top_right, self.bottom_right, self.bottom_left, x, y)
    }
}

fn blerp_channel(top_left: u8, top_right: u8, bottom_right: u8, bottom_left: u8, x: f64, y: f64) -> u8 {
    let v = top_left as f64 * (1.0 - x) * (1.0 - y)
        + top_right as f64 * x * (1.0 - y)
        + bottom_left as f64 * (1.0 - x) * y
        + bottom_right as f64 * x * y;
    // Truncation, not rounding.
    v as u8
}

/// Bilinear interpolation of four corners at `x, y` in `[0, 1]`, per channel. Always opaque.
pub fn blerp(top_left: Color, top_right: Color, bottom_right: Color, bottom_left: Color, x: f64, y: f64) -> Color {
    Color::rgb(
        blerp_channel(top_left.r, top_right.r, bottom_right.r, bottom_left.r, x, y),
        blerp_channel(top_left.g, top_right.g, bottom_right.g, bottom_left.g, x, y),
        blerp_channel(top_left.b, top_right.b, bottom_right.b, bottom_left.b, x, y),
    )
}

pub const NAMED_COLORS: [(&str, Color); 28] = [
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("crimson", Color::rgb(220, 20, 60)),
    ("tomato", Color::rgb(255, 99, 71)),
    ("coral", Color::rgb(255, 127, 80)),
    ("dark_orange", Color::rgb(255, 140, 0)),
    ("gold", Color::rgb(255, 215, 0)),
    ("khaki", Color::rgb(240, 230, 140)),
    ("lemon_chiffon", Color::rgb(255, 250, 205)),
    ("chartreuse", Color::rgb(127, 255, 0)),
    ("yellow_green", Color::rgb(154, 205, 50)),
    ("pale_green", Color::rgb(152, 251, 152)),
    ("sea_green", Color::rgb(46, 139, 87)),
    ("light_sea_green", Color::rgb(32, 178, 170)),
    ("dark_turquoise", Color::rgb(0, 206, 209)),
    ("deep_sky_blue", Color::rgb(0, 191, 255)),
    ("dodger_blue", Color::rgb(30, 144, 255)),
    ("royal_blue", Color::rgb(65, 105, 225)),
    ("midnight_blue", Color::rgb(25, 25, 112)),
    ("dark_slate_blue", Color::rgb(72, 61, 139)),
    ("medium_purple", Color::rgb(147, 112, 219)),
    ("violet", Color::rgb(238, 130, 238)),
    ("deep_pink", Color::rgb(255, 20, 147)),
    ("salmon", Color::rgb(250, 128, 114)),
    ("moccasin", Color::rgb(255, 228, 181)),
    ("firebrick", Color::rgb(178, 34, 34)),
    ("sienna", Color::rgb(160, 82, 45)),
    ("slate_gray", Color::rgb(112, 128, 144)),
];

pub fn named(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_matches_signed_layout() {
        assert_eq!(Color::BLACK.to_argb(), -16_777_216);
        assert_eq!(Color::WHITE.to_argb(), -1);
        assert_eq!(Color::rgb(30, 144, 255).to_argb(), -14_774_017);
        assert_eq!(Color::from_argb(-14_774_017), Color::rgb(30, 144, 255));
    }

    #[test]
    fn argb_keeps_alpha() {
        let translucent = Color::rgba(1, 2, 3, 4);
        assert_eq!(Color::from_argb(translucent.to_argb()), translucent);
        assert!(translucent.same_rgb(Color::rgb(1, 2, 3)));
        assert_ne!(translucent, Color::rgb(1, 2, 3));
    }

    #[test]
    fn blerp_truncates_each_channel() {
        let c = blerp(Color::BLACK, Color::WHITE, Color::WHITE, Color::BLACK, 0.5, 0.0);
        // 127.5 truncates down.
        assert_eq!(c, Color::rgb(127, 127, 127));
    }

    #[test]
    fn blerp_corners_are_exact() {
        let tl = Color::rgb(10, 20, 30);
        let tr = Color::rgb(200, 100, 0);
        let br = Color::rgb(255, 255, 255);
        let bl = Color::rgb(1, 2, 3);
        assert_eq!(blerp(tl, tr, br, bl, 0.0, 0.0), tl);
        assert_eq!(blerp(tl, tr, br, bl, 1.0, 0.0), tr);
        assert_eq!(blerp(tl, tr, br, bl, 1.0, 1.0), br);
        assert_eq!(blerp(tl, tr, br, bl, 0.0, 1.0), bl);
    }

    #[test]
    fn single_column_gradient_does_not_divide_by_zero() {
        let corners = Corners::new(Color::BLACK, Color::WHITE, Color::WHITE, Color::BLACK);
        assert_eq!(corners.cell(0, 0, 1, 1), Color::BLACK);
        assert_eq!(corners.cell(0, 2, 1, 3), Color::BLACK);
        assert_eq!(corners.cell(2, 0, 3, 1), Color::WHITE);
    }

    #[test]
    fn palette_names_are_unique_and_opaque() {
        for (i, (name, color)) in NAMED_COLORS.iter().enumerate() {
            assert_eq!(color.a, 255);
            assert!(NAMED_COLORS[i + 1..].iter().all(|(n, c)| n != name && c != color));
        }
        assert_eq!(named("dodger_blue"), Some(Color::rgb(30, 144, 255)));
        assert_eq!(named("ultraviolet"), None);
    }
}
