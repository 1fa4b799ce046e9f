//! Risk matrix renderer
//!
//! Maps a `GeometricDescription` from grid space onto a `Surface`. No layout
//! decisions happen here: grid space is already y-down, so one cell becomes a
//! `cell × cell` pixel square and everything else follows.

use std::path::{Path, PathBuf};

use super::font::{self, scale_for_points, Face, CHAR_H};
use super::raster::{tick_margin, PngCompression, RasterSurface};
use super::surface::{Anchor, ClipCircle, PixelRect, PixelTick, Surface, TextStyle, TickAxis};
use crate::matrix::{Axis, Color, GeometricDescription, MatrixError, Palette, Point, Result};

const TICK_PT: f64 = 6.0;
const AXIS_TITLE_PT: f64 = 12.0;
const TITLE_PT: f64 = 14.0;
const MATERIAL_PT: f64 = 10.0;
const BUBBLE_PT: f64 = 4.0;
const OVERFLOW_PT: f64 = 6.0;

/// Gridline dash pattern (on, off) in pixels
const GRID_DASH: (u32, u32) = (6, 4);

/// Largest canvas side, in pixels
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Largest canvas area, in pixels (192 MiB of RGB)
pub const MAX_CANVAS_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: f64,
    pub title: Option<String>,
    pub bubble_color: Color,
    pub bubble_text_color: Color,
    pub material_color: Color,
    pub material_label: String,
    pub compression: PngCompression,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_px: 800,
            height_px: 800,
            dpi: 100.0,
            title: Some("Risk Matrix".to_string()),
            bubble_color: Color::opaque([255, 0, 0]),
            bubble_text_color: Color::opaque([255, 255, 255]),
            material_color: Color::opaque([211, 211, 211]).with_alpha(0.5),
            material_label: "Material".to_string(),
            compression: PngCompression::Default,
        }
    }
}

impl RenderOptions {
    fn scale(&self, points: f64) -> u32 {
        scale_for_points(points, self.dpi)
    }

    /// Reject canvases that are empty or too large to allocate
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.width_px, self.height_px);
        if w == 0 || h == 0 || w > MAX_CANVAS_SIDE || h > MAX_CANVAS_SIDE {
            return Err(MatrixError::Config(format!(
                "canvas {}x{} px out of range: each side must be 1..={}",
                w, h, MAX_CANVAS_SIDE
            )));
        }
        if w as u64 * h as u64 > MAX_CANVAS_PIXELS {
            return Err(MatrixError::Config(format!(
                "canvas {}x{} px exceeds {} pixels",
                w, h, MAX_CANVAS_PIXELS
            )));
        }
        Ok(())
    }
}

/// Pixel placement of the 6×6 grid on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub left: f64,
    pub top: f64,
    /// Side of one cell in pixels
    pub cell: f64,
    pub extent: usize,
}

impl PlotFrame {
    pub fn to_px(&self, p: Point) -> (f64, f64) {
        (self.left + p.x * self.cell, self.top + p.y * self.cell)
    }

    pub fn side(&self) -> f64 {
        self.cell * self.extent as f64
    }

    pub fn right(&self) -> f64 {
        self.left + self.side()
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.side()
    }

    /// Fit a square grid into the canvas, leaving room for titles and tick labels
    pub fn fit(desc: &GeometricDescription, options: &RenderOptions, size: (u32, u32)) -> Result<Self> {
        let pad = 8.0 * options.dpi / 100.0;
        let tick_scale = options.scale(TICK_PT);
        let line_h = (CHAR_H * tick_scale) as f64;
        let axis_title_h = (CHAR_H * options.scale(AXIS_TITLE_PT)) as f64;

        let y_label_w = widest_tick_label(&desc.y_axis, tick_scale);
        let x_label_w = widest_tick_label(&desc.x_axis, tick_scale);
        let x_label_lines = desc
            .x_axis
            .ticks
            .iter()
            .map(|t| t.label.lines.len())
            .max()
            .unwrap_or(0) as f64;

        let left = pad + axis_title_h + pad + y_label_w + tick_margin();
        let right = pad + x_label_w / 2.0;
        let top = match options.title {
            Some(_) => pad + (CHAR_H * options.scale(TITLE_PT)) as f64 + pad,
            None => pad,
        };
        let bottom = tick_margin() + x_label_lines * line_h + pad + axis_title_h + pad;

        let avail_w = size.0 as f64 - left - right;
        let avail_h = size.1 as f64 - top - bottom;
        let side = avail_w.min(avail_h);
        if side < desc.extent as f64 {
            return Err(MatrixError::Config(format!(
                "canvas {}x{} px too small for the grid and its labels",
                size.0, size.1
            )));
        }

        Ok(Self {
            left,
            top,
            cell: side / desc.extent as f64,
            extent: desc.extent,
        })
    }
}

/// Widest tick label line on `axis` in pixels, as the bitmap font draws it
fn widest_tick_label(axis: &Axis, scale: u32) -> f64 {
    axis.ticks
        .iter()
        .flat_map(|t| t.label.lines.iter())
        .map(|line| font::text_size(line, scale).0)
        .max()
        .unwrap_or(0) as f64
}

/// Draw a laid-out matrix onto any surface
pub fn render<S: Surface + ?Sized>(
    desc: &GeometricDescription,
    surface: &mut S,
    options: &RenderOptions,
) -> Result<PlotFrame> {
    let frame = PlotFrame::fit(desc, options, surface.size())?;
    let (width, _) = surface.size();

    // Title
    if let Some(title) = &options.title {
        let style = TextStyle::new(options.scale(TITLE_PT), Palette::TEXT).bold();
        let pad = 8.0 * options.dpi / 100.0;
        surface.draw_text(width as f64 / 2.0, pad, title, Anchor::TopCenter, &style);
    }

    // Material highlights
    let material_style = TextStyle::new(options.scale(MATERIAL_PT), Palette::MATERIAL_TEXT).bold();
    for highlight in &desc.highlights {
        let (x, y) = frame.to_px(Point {
            x: highlight.rect.x,
            y: highlight.rect.y,
        });
        surface.fill_rect(
            PixelRect {
                x,
                y,
                width: highlight.rect.width * frame.cell,
                height: highlight.rect.height * frame.cell,
            },
            options.material_color,
        );
        let (cx, cy) = frame.to_px(highlight.rect.center());
        surface.draw_text(cx, cy, &options.material_label, Anchor::Center, &material_style);
    }

    // Dashed gridlines on cell borders, solid frame around the grid
    for i in 0..=desc.extent {
        let offset = i as f64 * frame.cell;
        surface.draw_dashed_line(
            (frame.left + offset, frame.top),
            (frame.left + offset, frame.bottom()),
            Palette::GRID_LINE,
            GRID_DASH,
        );
        surface.draw_dashed_line(
            (frame.left, frame.top + offset),
            (frame.right(), frame.top + offset),
            Palette::GRID_LINE,
            GRID_DASH,
        );
    }
    draw_frame(surface, &frame);

    // Bubbles
    for bubble in &desc.bubbles {
        let (cx, cy) = frame.to_px(bubble.center);
        let clip = ClipCircle {
            cx,
            cy,
            radius: bubble.radius * frame.cell,
        };
        surface.fill_circle(cx, cy, clip.radius, options.bubble_color);
        let style = bubble_label_style(&bubble.label, clip, options);
        surface.draw_text(cx, cy, &bubble.label, Anchor::Center, &style);
    }

    // Hidden-risk counts
    let overflow_style = TextStyle::new(options.scale(OVERFLOW_PT), Palette::OVERFLOW_TEXT).bold();
    let inset = 0.04 * frame.cell;
    for marker in &desc.overflow {
        let (x, y) = frame.to_px(marker.anchor);
        let text = format!("+{}", marker.hidden);
        surface.draw_text(x - inset, y - inset, &text, Anchor::BottomRight, &overflow_style);
    }

    // Ticks
    let tick_style = TextStyle::new(options.scale(TICK_PT), Palette::TEXT);
    let to_pixel_ticks = |axis: &Axis, origin: f64| -> Vec<PixelTick> {
        axis.ticks
            .iter()
            .map(|t| PixelTick {
                position: origin + t.position * frame.cell,
                lines: t.label.lines.clone(),
            })
            .collect()
    };
    let x_ticks = to_pixel_ticks(&desc.x_axis, frame.left);
    let y_ticks = to_pixel_ticks(&desc.y_axis, frame.top);
    surface.set_ticks(TickAxis::Bottom { edge: frame.bottom() }, &x_ticks, &tick_style);
    surface.set_ticks(TickAxis::Left { edge: frame.left }, &y_ticks, &tick_style);

    // Axis titles
    let title_style = TextStyle::new(options.scale(AXIS_TITLE_PT), Palette::TEXT).bold();
    let line_h = (CHAR_H * tick_style.scale) as f64;
    let x_lines = x_ticks.iter().map(|t| t.lines.len()).max().unwrap_or(0) as f64;
    let pad = 8.0 * options.dpi / 100.0;
    let x_title_y = frame.bottom() + tick_margin() + x_lines * line_h + pad;
    surface.draw_text(
        frame.left + frame.side() / 2.0,
        x_title_y,
        &desc.x_axis.title,
        Anchor::TopCenter,
        &title_style,
    );
    surface.draw_text(
        pad + (CHAR_H * title_style.scale) as f64 / 2.0,
        frame.top + frame.side() / 2.0,
        &desc.y_axis.title,
        Anchor::Center,
        &title_style.rotated(),
    );

    tracing::debug!(
        left = frame.left,
        top = frame.top,
        cell = frame.cell,
        bubbles = desc.bubbles.len(),
        "matrix rendered"
    );
    Ok(frame)
}

/// Regular bold glyphs when the id fits its circle, otherwise the largest
/// compact scale that fits. Always clipped to the circle.
fn bubble_label_style(label: &str, clip: ClipCircle, options: &RenderOptions) -> TextStyle {
    let fits = |face: Face, scale: u32, bold: bool| {
        let (w, h) = face.text_size(label, scale);
        let w = if bold { w + scale } else { w };
        let (hw, hh) = (w as f64 / 2.0, h as f64 / 2.0);
        (hw * hw + hh * hh).sqrt() <= clip.radius
    };
    let scale = options.scale(BUBBLE_PT);
    let base = TextStyle::new(scale, options.bubble_text_color).clipped_to(clip);
    if fits(Face::Regular, scale, true) {
        return base.bold();
    }
    let compact = (1..=scale)
        .rev()
        .find(|&s| fits(Face::Compact, s, false))
        .unwrap_or(1);
    TextStyle {
        scale: compact,
        ..base.with_face(Face::Compact)
    }
}

fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &PlotFrame) {
    let side = frame.side();
    let edges = [
        (frame.left, frame.top, side, 1.0),
        (frame.left, frame.bottom() - 1.0, side, 1.0),
        (frame.left, frame.top, 1.0, side),
        (frame.right() - 1.0, frame.top, 1.0, side),
    ];
    for (x, y, width, height) in edges {
        surface.fill_rect(
            PixelRect {
                x,
                y,
                width,
                height,
            },
            Palette::FRAME,
        );
    }
}

/// Render to a PNG file at `path` and return the path
pub fn export_png(
    desc: &GeometricDescription,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    options.validate()?;
    let mut surface = RasterSurface::new(options.width_px, options.height_px, options.compression);
    render(desc, &mut surface, options)?;
    surface.save(path)?;
    tracing::info!(path = %path.display(), "risk matrix image written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{
        layout, AxisLabels, CoordinatePolicy, LayoutOptions, MaterialCellSet, OverflowPolicy,
        Risk,
    };
    use crate::render::surface::recording::{DrawOp, RecordingSurface};

    fn scenario() -> GeometricDescription {
        let risks = vec![Risk::new(1, 1, 1), Risk::new(2, 1, 1), Risk::new(3, 6, 6)];
        let material = MaterialCellSet::from_scores([(1, 1)], CoordinatePolicy::Reject).unwrap();
        layout(&risks, &material, &AxisLabels::default(), &LayoutOptions::default()).unwrap()
    }

    #[test]
    fn test_draw_calls_for_scenario() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(800, 800);
        render(&desc, &mut surface, &RenderOptions::default()).unwrap();

        assert_eq!(surface.circles(), 3);
        let texts = surface.texts();
        for expected in ["1", "2", "3", "Material", "Likelihood", "Impact", "Risk Matrix"] {
            assert!(texts.contains(&expected), "missing text {expected}");
        }
        assert_eq!(texts.iter().filter(|t| **t == "Material").count(), 1);

        let dashed = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Dashed { .. }))
            .count();
        assert_eq!(dashed, 14);
    }

    #[test]
    fn test_bubble_pixel_positions() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(800, 800);
        let frame = render(&desc, &mut surface, &RenderOptions::default()).unwrap();

        let circles: Vec<(f64, f64, f64)> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { cx, cy, radius } => Some((*cx, *cy, *radius)),
                _ => None,
            })
            .collect();
        let (cx, cy, r) = circles[0];
        assert!((cx - (frame.left + 0.1 * frame.cell)).abs() < 1e-9);
        assert!((cy - (frame.top + 0.1 * frame.cell)).abs() < 1e-9);
        assert!((r - 0.05 * frame.cell).abs() < 1e-9);
        // Second bubble is one slot to the right
        assert!((circles[1].0 - cx - 0.12 * frame.cell).abs() < 1e-9);
        // Risk 3 sits in the bottom-right cell
        assert!(circles[2].0 > frame.left + 5.0 * frame.cell);
        assert!(circles[2].1 > frame.top + 5.0 * frame.cell);
    }

    #[test]
    fn test_ticks_follow_description() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(800, 800);
        render(&desc, &mut surface, &RenderOptions::default()).unwrap();

        let ticks: Vec<(TickAxis, Vec<PixelTick>)> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Ticks { axis, ticks } => Some((*axis, ticks.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(ticks.len(), 2);
        assert!(matches!(ticks[1].0, TickAxis::Left { .. }));
        let left = &ticks[1].1;
        assert_eq!(left.len(), 6);
        assert!(left.windows(2).all(|w| w[0].position < w[1].position));
        assert_eq!(left[0].lines, desc.y_axis.ticks[0].label.lines);
    }

    #[test]
    fn test_y_title_is_rotated() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(800, 800);
        render(&desc, &mut surface, &RenderOptions::default()).unwrap();
        let rotated = surface.ops.iter().any(|op| {
            matches!(op, DrawOp::Text { text, style, .. } if text == "Impact" && style.rotated)
        });
        assert!(rotated);
    }

    #[test]
    fn test_overflow_marker_text() {
        let risks: Vec<Risk> = (1..=40).map(|i| Risk::new(i, 3, 3)).collect();
        let options = LayoutOptions {
            overflow: OverflowPolicy::Indicator,
            ..Default::default()
        };
        let desc = layout(&risks, &MaterialCellSet::new(), &AxisLabels::default(), &options)
            .unwrap();
        let mut surface = RecordingSurface::new(800, 800);
        render(&desc, &mut surface, &RenderOptions::default()).unwrap();
        assert_eq!(surface.circles(), 36);
        assert!(surface.texts().contains(&"+4"));
    }

    #[test]
    fn test_tick_label_width_counts_drawn_glyphs() {
        // Each CJK character is two terminal columns but one bitmap glyph
        let describe = |text: &str| {
            let row: Vec<String> = (0..6).map(|_| text.to_string()).collect();
            let labels = AxisLabels::new(row.clone(), row).unwrap();
            layout(&[], &MaterialCellSet::new(), &labels, &LayoutOptions::default()).unwrap()
        };
        let frame_for = |desc: &GeometricDescription| {
            let mut surface = RecordingSurface::new(800, 800);
            render(desc, &mut surface, &RenderOptions::default()).unwrap()
        };
        let wide = describe("风险等级");
        assert_eq!(frame_for(&wide), frame_for(&describe("abcd")));
        assert_eq!(widest_tick_label(&wide.y_axis, 1), 23.0);
    }

    #[test]
    fn test_no_title() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(800, 800);
        let options = RenderOptions {
            title: None,
            ..Default::default()
        };
        render(&desc, &mut surface, &options).unwrap();
        assert!(!surface.texts().contains(&"Risk Matrix"));
    }

    #[test]
    fn test_canvas_too_small() {
        let desc = scenario();
        let mut surface = RecordingSurface::new(100, 100);
        let err = render(&desc, &mut surface, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, MatrixError::Config(_)));
    }

    #[test]
    fn test_export_png() {
        let desc = scenario();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_matrix.png");
        let options = RenderOptions::default();

        let written = export_png(&desc, &options, &path).unwrap();
        assert_eq!(written, path);

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (800, 800));

        // Recompute where risk 3 landed and check the bubble color there
        let mut probe = RecordingSurface::new(800, 800);
        let frame = render(&desc, &mut probe, &options).unwrap();
        let (cx, cy) = frame.to_px(desc.bubbles[2].center);
        // Offset from the exact center to stay clear of the white label
        let px = img.get_pixel((cx - 0.03 * frame.cell) as u32, cy as u32);
        assert_eq!(px.0, [255, 0, 0]);
    }

    #[test]
    fn test_bubble_ids_stay_inside_their_circles() {
        let risks = vec![
            Risk::new(7, 1, 1),
            Risk::new(36, 2, 2),
            Risk::new(100, 3, 3),
            Risk::new("R-12", 4, 4),
        ];
        let desc = layout(
            &risks,
            &MaterialCellSet::new(),
            &AxisLabels::default(),
            &LayoutOptions::default(),
        )
        .unwrap();
        let blue = Color::opaque([0, 0, 255]);
        let options = RenderOptions {
            bubble_text_color: blue,
            ..Default::default()
        };
        let mut surface = RasterSurface::new(800, 800, PngCompression::Fast);
        let frame = render(&desc, &mut surface, &options).unwrap();

        let circles: Vec<ClipCircle> = desc
            .bubbles
            .iter()
            .map(|b| {
                let (cx, cy) = frame.to_px(b.center);
                ClipCircle {
                    cx,
                    cy,
                    radius: b.radius * frame.cell,
                }
            })
            .collect();
        let mut per_bubble = vec![0usize; circles.len()];
        for (x, y, px) in surface.image().enumerate_pixels() {
            if px.0 != blue.rgb {
                continue;
            }
            let owner = circles
                .iter()
                .position(|c| c.contains_pixel(x as i64, y as i64));
            match owner {
                Some(i) => per_bubble[i] += 1,
                None => panic!("label pixel ({x}, {y}) outside every bubble"),
            }
        }
        assert!(per_bubble.iter().all(|&n| n > 0), "{per_bubble:?}");
    }

    #[test]
    fn test_bubble_label_face_follows_radius() {
        let options = RenderOptions::default();
        let clip = |radius| ClipCircle {
            cx: 0.0,
            cy: 0.0,
            radius,
        };
        // Default canvas: one digit fits in regular glyphs, two do not
        let single = bubble_label_style("7", clip(5.1), &options);
        assert_eq!(single.face, Face::Regular);
        assert!(single.bold);
        let double = bubble_label_style("36", clip(5.1), &options);
        assert_eq!(double.face, Face::Compact);
        assert_eq!(double.clip, Some(clip(5.1)));
        // A large bubble keeps the regular face
        assert_eq!(bubble_label_style("36", clip(40.0), &options).face, Face::Regular);
    }

    #[test]
    fn test_canvas_limits() {
        assert!(RenderOptions::default().validate().is_ok());
        let sized = |width_px, height_px| RenderOptions {
            width_px,
            height_px,
            ..Default::default()
        };
        assert!(sized(MAX_CANVAS_SIDE, 4096).validate().is_ok());
        for (w, h) in [(0, 800), (60_000, 60_000), (MAX_CANVAS_SIDE + 1, 10), (12_000, 12_000)] {
            let err = sized(w, h).validate().unwrap_err();
            assert!(matches!(err, MatrixError::Config(_)), "{w}x{h}");
        }
    }

    #[test]
    fn test_oversized_export_writes_nothing() {
        let desc = scenario();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let options = RenderOptions {
            width_px: 60_000,
            height_px: 60_000,
            ..Default::default()
        };
        let err = export_png(&desc, &options, &path).unwrap_err();
        assert!(matches!(err, MatrixError::Config(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let desc = scenario();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = export_png(&desc, &RenderOptions::default(), &path).unwrap_err();
        assert!(matches!(err, MatrixError::Export(_)));
    }
}
