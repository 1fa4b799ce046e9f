//! Drawing capability set
//!
//! The renderer only needs a handful of primitives. Any backend that can fill
//! rectangles and circles, draw text, draw dashed lines, place axis ticks and
//! save itself can host a risk matrix. Coordinates are pixels, origin top-left.

use std::path::Path;

use super::font::Face;
use crate::matrix::{Color, Result};

/// Where a text's reference point sits on its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopCenter,
    BottomCenter,
    CenterRight,
    BottomRight,
}

impl Anchor {
    /// Top-left corner of a `w × h` box anchored at (x, y)
    pub fn top_left(self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        match self {
            Anchor::Center => (x - w / 2.0, y - h / 2.0),
            Anchor::TopCenter => (x - w / 2.0, y),
            Anchor::BottomCenter => (x - w / 2.0, y - h),
            Anchor::CenterRight => (x - w, y - h / 2.0),
            Anchor::BottomRight => (x - w, y - h),
        }
    }
}

/// Circle that text pixels must fall inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipCircle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl ClipCircle {
    /// Same test `fill_circle` uses: the pixel center lies within the radius
    pub fn contains_pixel(&self, x: i64, y: i64) -> bool {
        let dx = x as f64 + 0.5 - self.cx;
        let dy = y as f64 + 0.5 - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Integer glyph scale (1 = one font pixel per canvas pixel)
    pub scale: u32,
    pub color: Color,
    pub bold: bool,
    /// Rotated 90° counter-clockwise (reads bottom to top)
    pub rotated: bool,
    pub face: Face,
    pub clip: Option<ClipCircle>,
}

impl TextStyle {
    pub fn new(scale: u32, color: Color) -> Self {
        Self {
            scale: scale.max(1),
            color,
            bold: false,
            rotated: false,
            face: Face::Regular,
            clip: None,
        }
    }

    pub fn with_face(mut self, face: Face) -> Self {
        self.face = face;
        self
    }

    pub fn clipped_to(mut self, clip: ClipCircle) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self) -> Self {
        self.rotated = true;
        self
    }
}

/// Pixel-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Which edge of the plot a set of ticks belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAxis {
    /// Ticks below the plot; `edge` is the y of the plot's bottom border
    Bottom { edge: f64 },
    /// Ticks left of the plot; `edge` is the x of the plot's left border
    Left { edge: f64 },
}

/// A tick in pixel space with its (already wrapped) label lines
#[derive(Debug, Clone, PartialEq)]
pub struct PixelTick {
    pub position: f64,
    pub lines: Vec<String>,
}

pub trait Surface {
    /// Canvas size in pixels
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);

    /// Draw a single line of text anchored at (x, y)
    fn draw_text(&mut self, x: f64, y: f64, text: &str, anchor: Anchor, style: &TextStyle);

    /// Dashed line; `dash` is (on, off) in pixels
    fn draw_dashed_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, dash: (u32, u32));

    /// Tick marks and their labels along one plot edge
    fn set_ticks(&mut self, axis: TickAxis, ticks: &[PixelTick], style: &TextStyle);

    /// Write the canvas to `path`
    fn save(&self, path: &Path) -> Result<()>;
}
