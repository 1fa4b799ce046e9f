//! Colors used by the renderer
//!
//! Configurable colors come from hex strings in the property file; the fixed
//! chrome (background, grid, text) lives in `Palette`.

/// RGB color with an opacity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub rgb: [u8; 3],
    pub alpha: f64,
}

impl Color {
    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            rgb: self.rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Blend this color over `base`
    pub fn over(self, base: [u8; 3]) -> [u8; 3] {
        let a = self.alpha;
        let mix = |src: u8, dst: u8| (src as f64 * a + dst as f64 * (1.0 - a)).round() as u8;
        [
            mix(self.rgb[0], base[0]),
            mix(self.rgb[1], base[1]),
            mix(self.rgb[2], base[2]),
        ]
    }
}

pub struct Palette;

impl Palette {
    pub const BACKGROUND: Color = Color::opaque([255, 255, 255]);
    pub const GRID_LINE: Color = Color::opaque([176, 176, 176]);
    pub const FRAME: Color = Color::opaque([0, 0, 0]);
    pub const TEXT: Color = Color::opaque([0, 0, 0]);
    pub const OVERFLOW_TEXT: Color = Color::opaque([139, 0, 0]);
    pub const MATERIAL_TEXT: Color = Color::opaque([255, 255, 255]);
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and both without `#`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim().trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#D3D3D3"), Some([211, 211, 211]));
        assert_eq!(parse_hex_color("1F78B4"), Some([31, 120, 180]));
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
        assert_eq!(parse_hex_color("red"), None);
    }

    #[test]
    fn test_blend() {
        let grey = Color::opaque([211, 211, 211]).with_alpha(0.5);
        assert_eq!(grey.over([255, 255, 255]), [233, 233, 233]);
        assert_eq!(Color::opaque([1, 2, 3]).over([200, 200, 200]), [1, 2, 3]);
        assert_eq!(Color::opaque([1, 2, 3]).with_alpha(0.0).over([9, 9, 9]), [9, 9, 9]);
    }
}
