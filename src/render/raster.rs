//! Raster backend: an RGB pixel buffer written out as PNG

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::surface::{Anchor, ClipCircle, PixelRect, PixelTick, Surface, TextStyle, TickAxis};
use crate::matrix::{Color, Palette, Result};

const TICK_LEN: f64 = 5.0;
const TICK_PAD: f64 = 4.0;

/// PNG compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl PngCompression {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fast" => Self::Fast,
            "best" => Self::Best,
            _ => Self::Default,
        }
    }

    fn to_image(self) -> CompressionType {
        match self {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

pub struct RasterSurface {
    img: RgbImage,
    compression: PngCompression,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, compression: PngCompression) -> Self {
        let bg = Palette::BACKGROUND.rgb;
        Self {
            img: RgbImage::from_pixel(width.max(1), height.max(1), Rgb(bg)),
            compression,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    #[inline]
    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return;
        }
        let px = self.img.get_pixel_mut(x as u32, y as u32);
        px.0 = color.over(px.0);
    }

    fn draw_glyph(&mut self, x: i64, y: i64, ch: char, style: &TextStyle) {
        let face = style.face;
        let (glyph_w, glyph_h) = (face.glyph_w(), face.glyph_h());
        let s = style.scale as i64;
        for row in 0..glyph_h {
            for col in 0..glyph_w {
                if !face.pixel(ch, col, row) {
                    continue;
                }
                // Unrotated: (col, row). Rotated CCW: glyph column runs upward.
                let (gx, gy) = if style.rotated {
                    (row as i64, (glyph_w - 1 - col) as i64)
                } else {
                    (col as i64, row as i64)
                };
                let thickness = if style.bold { s + 1 } else { s };
                for dy in 0..s {
                    for dx in 0..thickness {
                        let (bx, by) = if style.rotated { (dy, dx) } else { (dx, dy) };
                        let (px, py) = (x + gx * s + bx, y + gy * s + by);
                        if style.clip.is_some_and(|c| !c.contains_pixel(px, py)) {
                            continue;
                        }
                        self.blend_pixel(px, py, style.color);
                    }
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let x1 = (rect.x + rect.width).round() as i64;
        let y1 = (rect.y + rect.height).round() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let clip = ClipCircle { cx, cy, radius };
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if clip.contains_pixel(x, y) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, anchor: Anchor, style: &TextStyle) {
        let (w, h) = style.face.text_size(text, style.scale);
        let (w, h) = if style.rotated { (h, w) } else { (w, h) };
        let (left, top) = anchor.top_left(x, y, w as f64, h as f64);
        let (left, top) = (left.round() as i64, top.round() as i64);

        let advance = (style.face.char_w() * style.scale) as i64;
        let n = text.chars().count() as i64;
        for (i, ch) in text.chars().enumerate() {
            let i = i as i64;
            if style.rotated {
                // First character at the bottom
                let y = top + (n - 1 - i) * advance;
                self.draw_glyph(left, y, ch, style);
            } else {
                self.draw_glyph(left + i * advance, top, ch, style);
            }
        }
    }

    fn draw_dashed_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, dash: (u32, u32)) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let period = (dash.0 + dash.1).max(1) as usize;
        let steps = length.ceil() as usize;
        for step in 0..=steps {
            if step % period >= dash.0 as usize {
                continue;
            }
            let t = step as f64 / length;
            let t = t.min(1.0);
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            self.blend_pixel(x.round() as i64, y.round() as i64, color);
        }
    }

    fn set_ticks(&mut self, axis: TickAxis, ticks: &[PixelTick], style: &TextStyle) {
        let line_h = (style.face.char_h() * style.scale) as f64;
        for tick in ticks {
            match axis {
                TickAxis::Bottom { edge } => {
                    let mark = PixelRect {
                        x: tick.position,
                        y: edge,
                        width: 1.0,
                        height: TICK_LEN,
                    };
                    self.fill_rect(mark, Palette::FRAME);
                    let top = edge + TICK_LEN + TICK_PAD;
                    for (i, line) in tick.lines.iter().enumerate() {
                        let y = top + i as f64 * line_h;
                        self.draw_text(tick.position, y, line, Anchor::TopCenter, style);
                    }
                }
                TickAxis::Left { edge } => {
                    let mark = PixelRect {
                        x: edge - TICK_LEN,
                        y: tick.position,
                        width: TICK_LEN,
                        height: 1.0,
                    };
                    self.fill_rect(mark, Palette::FRAME);
                    // Vertically center the block of lines on the tick
                    let block = tick.lines.len() as f64 * line_h;
                    let first = tick.position - block / 2.0 + line_h / 2.0;
                    let right = edge - TICK_LEN - TICK_PAD;
                    for (i, line) in tick.lines.iter().enumerate() {
                        let y = first + i as f64 * line_h;
                        self.draw_text(right, y, line, Anchor::CenterRight, style);
                    }
                }
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let encoder =
            PngEncoder::new_with_quality(writer, self.compression.to_image(), FilterType::Adaptive);
        self.img.write_with_encoder(encoder)?;
        Ok(())
    }
}

/// Tick mark length plus the gap before the label, in pixels
pub fn tick_margin() -> f64 {
    TICK_LEN + TICK_PAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font::Face;

    const RED: Color = Color::opaque([255, 0, 0]);

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut s = RasterSurface::new(40, 40, PngCompression::Fast);
        s.fill_circle(20.0, 20.0, 5.0, RED);
        assert_eq!(s.image().get_pixel(20, 20).0, [255, 0, 0]);
        assert_eq!(s.image().get_pixel(20, 30).0, Palette::BACKGROUND.rgb);
    }

    #[test]
    fn test_translucent_rect_blends() {
        let mut s = RasterSurface::new(10, 10, PngCompression::Fast);
        let grey = Color::opaque([211, 211, 211]).with_alpha(0.5);
        let rect = PixelRect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        };
        s.fill_rect(rect, grey);
        assert_eq!(s.image().get_pixel(2, 2).0, [233, 233, 233]);
        assert_eq!(s.image().get_pixel(7, 7).0, [255, 255, 255]);
    }

    #[test]
    fn test_text_clips_at_edges() {
        let mut s = RasterSurface::new(8, 8, PngCompression::Fast);
        let style = TextStyle::new(3, Palette::TEXT);
        // Must not panic when drawing far outside the canvas
        s.draw_text(-100.0, 4.0, "clipped", Anchor::Center, &style);
        s.draw_text(4.0, 4.0, "W", Anchor::Center, &style.rotated());
    }

    #[test]
    fn test_clipped_text_stays_in_circle() {
        let mut s = RasterSurface::new(40, 40, PngCompression::Fast);
        let blue = Color::opaque([0, 0, 255]);
        let clip = ClipCircle {
            cx: 20.0,
            cy: 20.0,
            radius: 4.0,
        };
        let style = TextStyle::new(2, blue).bold().clipped_to(clip);
        s.draw_text(20.0, 20.0, "8888", Anchor::Center, &style);

        let mut inside = 0;
        for (x, y, px) in s.image().enumerate_pixels() {
            if px.0 == [0, 0, 255] {
                assert!(clip.contains_pixel(x as i64, y as i64), "({x}, {y}) outside");
                inside += 1;
            }
        }
        assert!(inside > 0);
    }

    #[test]
    fn test_compact_face_is_smaller() {
        let mut regular = RasterSurface::new(20, 20, PngCompression::Fast);
        let mut compact = RasterSurface::new(20, 20, PngCompression::Fast);
        let style = TextStyle::new(1, Palette::TEXT);
        regular.draw_text(10.0, 10.0, "8", Anchor::Center, &style);
        compact.draw_text(10.0, 10.0, "8", Anchor::Center, &style.with_face(Face::Compact));
        let count = |s: &RasterSurface| {
            s.image()
                .pixels()
                .filter(|p| p.0 == Palette::TEXT.rgb)
                .count()
        };
        // 5x7 '8' has 17 pixels, 3x5 '8' has 13
        assert_eq!(count(&regular), 17);
        assert_eq!(count(&compact), 13);
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut s = RasterSurface::new(30, 3, PngCompression::Fast);
        s.draw_dashed_line((0.0, 1.0), (29.0, 1.0), RED, (4, 4));
        assert_eq!(s.image().get_pixel(1, 1).0, [255, 0, 0]);
        assert_eq!(s.image().get_pixel(5, 1).0, Palette::BACKGROUND.rgb);
        assert_eq!(s.image().get_pixel(9, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_save_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        let mut s = RasterSurface::new(64, 32, PngCompression::Best);
        s.fill_circle(10.0, 10.0, 4.0, RED);
        s.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (64, 32));
        assert_eq!(loaded.get_pixel(10, 10).0, [255, 0, 0]);
    }

    #[test]
    fn test_compression_parse() {
        assert_eq!(PngCompression::parse("FAST"), PngCompression::Fast);
        assert_eq!(PngCompression::parse("best"), PngCompression::Best);
        assert_eq!(PngCompression::parse("other"), PngCompression::Default);
    }
}
