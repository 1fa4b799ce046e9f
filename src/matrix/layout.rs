//! Grid layout engine
//!
//! Turns a flat risk list into a `GeometricDescription`: highlight rectangles for
//! material cells, one bubble per visible risk, overflow markers and wrapped
//! axis ticks. Pure and deterministic; the renderer only scales what it gets.
//!
//! Coordinates are in *grid space*: one unit per cell, origin at the top-left
//! corner of the grid, x growing right and y growing down. Cell `(l, r)` covers
//! `[l, l + 1] × [r, r + 1]` where `r` is the display row of the impact index.

use std::collections::BTreeMap;

use super::error::{MatrixError, Result};
use super::types::{
    AxisLabels, Cell, CoordinatePolicy, MaterialCellSet, Risk, CELL_CAPACITY, GRID_SIZE,
    SUB_GRID_SIZE,
};
use super::wrap::{wrap_label, WrappedLabel};

/// What happens to risks beyond the 36 slots of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the excess (logged at warn level)
    #[default]
    Truncate,
    /// Fail the whole layout
    Reject,
    /// Keep the first 36 and emit an overflow marker with the hidden count
    Indicator,
}

impl OverflowPolicy {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reject" => Self::Reject,
            "indicator" => Self::Indicator,
            _ => Self::Truncate,
        }
    }
}

/// Vertical orientation of the impact axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpactOrder {
    /// Impact 1 on the top row (inverted y-axis)
    #[default]
    TopDown,
    /// Impact 1 on the bottom row
    BottomUp,
}

impl ImpactOrder {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "bottom-up" => Self::BottomUp,
            _ => Self::TopDown,
        }
    }

    /// Display row (0 = top) of an impact index.
    ///
    /// Bubbles, highlights and impact ticks all go through here.
    pub fn display_row(self, impact: usize) -> usize {
        match self {
            ImpactOrder::TopDown => impact,
            ImpactOrder::BottomUp => GRID_SIZE - 1 - impact,
        }
    }
}

/// Tunables for the layout pass, all in cell units
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub overflow: OverflowPolicy,
    pub coordinates: CoordinatePolicy,
    pub impact_order: ImpactOrder,
    pub wrap_width: usize,
    pub bubble_radius: f64,
    pub bubble_spacing: f64,
    /// Offset of slot (0, 0) from the cell's top-left corner
    pub bubble_inset: f64,
    pub x_title: String,
    pub y_title: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Truncate,
            coordinates: CoordinatePolicy::Reject,
            impact_order: ImpactOrder::TopDown,
            wrap_width: 15,
            bubble_radius: 0.05,
            bubble_spacing: 0.12,
            bubble_inset: 0.1,
            x_title: "Likelihood".to_string(),
            y_title: "Impact".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Check that every slot stays inside its cell
    pub fn validate(&self) -> Result<()> {
        if self.wrap_width == 0 {
            return Err(MatrixError::Config("label wrap width must be at least 1".into()));
        }
        if self.bubble_radius <= 0.0 || self.bubble_spacing <= 0.0 || self.bubble_inset < 0.0 {
            return Err(MatrixError::Config(
                "bubble radius and spacing must be positive, inset non-negative".into(),
            ));
        }
        let last = (SUB_GRID_SIZE - 1) as f64;
        let near = self.bubble_inset - self.bubble_radius;
        let far = self.bubble_inset + last * self.bubble_spacing + self.bubble_radius;
        if near < 0.0 || far > 1.0 {
            return Err(MatrixError::Config(format!(
                "bubble sub-grid spans [{:.3}, {:.3}], must stay within one cell [0, 1]",
                near, far
            )));
        }
        Ok(())
    }
}

/// A point in grid space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle in grid space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Position of a bubble inside its cell's sub-grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
}

impl Slot {
    pub fn from_index(i: usize) -> Self {
        Self {
            row: i / SUB_GRID_SIZE,
            col: i % SUB_GRID_SIZE,
        }
    }
}

/// Highlight overlay for a material cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellHighlight {
    pub cell: Cell,
    pub rect: Rect,
}

/// One risk marker
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub cell: Cell,
    pub slot: Slot,
    pub center: Point,
    pub radius: f64,
    pub label: String,
}

/// Count of risks hidden by the indicator overflow policy
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowMarker {
    pub cell: Cell,
    pub hidden: usize,
    /// Bottom-right corner of the cell
    pub anchor: Point,
}

/// A tick at the center of one column or row
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: WrappedLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: String,
    /// Ordered by increasing position
    pub ticks: Vec<Tick>,
}

/// Everything the renderer needs, in grid space
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricDescription {
    /// Number of cells per side; the grid spans `[0, extent]` on both axes
    pub extent: usize,
    pub highlights: Vec<CellHighlight>,
    pub bubbles: Vec<Bubble>,
    pub overflow: Vec<OverflowMarker>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub impact_order: ImpactOrder,
}

impl GeometricDescription {
    /// Bubbles belonging to one cell, in slot order
    pub fn bubbles_in(&self, cell: Cell) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter().filter(move |b| b.cell == cell)
    }

    pub fn is_highlighted(&self, cell: Cell) -> bool {
        self.highlights.iter().any(|h| h.cell == cell)
    }
}

/// Group risks by cell, keeping input order inside each cell
pub fn bucket_risks(
    risks: &[Risk],
    policy: CoordinatePolicy,
) -> Result<BTreeMap<Cell, Vec<&Risk>>> {
    let mut buckets: BTreeMap<Cell, Vec<&Risk>> = BTreeMap::new();
    for risk in risks {
        let cell = Cell::from_scores(risk.likelihood, risk.impact, policy)?;
        buckets.entry(cell).or_default().push(risk);
    }
    Ok(buckets)
}

/// Top-left corner of a cell in grid space
fn cell_origin(cell: Cell, order: ImpactOrder) -> Point {
    Point {
        x: cell.likelihood as f64,
        y: order.display_row(cell.impact) as f64,
    }
}

fn cell_rect(cell: Cell, order: ImpactOrder) -> Rect {
    let origin = cell_origin(cell, order);
    Rect {
        x: origin.x,
        y: origin.y,
        width: 1.0,
        height: 1.0,
    }
}

/// Lay out a risk matrix
pub fn layout(
    risks: &[Risk],
    material: &MaterialCellSet,
    labels: &AxisLabels,
    options: &LayoutOptions,
) -> Result<GeometricDescription> {
    // AxisLabels fields are public, so re-check the counts here
    let labels = AxisLabels::new(labels.likelihood.clone(), labels.impact.clone())?;
    options.validate()?;

    let order = options.impact_order;
    let buckets = bucket_risks(risks, options.coordinates)?;

    let highlights = material
        .iter()
        .map(|&cell| CellHighlight {
            cell,
            rect: cell_rect(cell, order),
        })
        .collect();

    let mut bubbles = Vec::new();
    let mut overflow = Vec::new();

    for (&cell, members) in &buckets {
        let hidden = members.len().saturating_sub(CELL_CAPACITY);
        if hidden > 0 {
            match options.overflow {
                OverflowPolicy::Reject => {
                    return Err(MatrixError::Overflow {
                        cell,
                        count: members.len(),
                        capacity: CELL_CAPACITY,
                    });
                }
                OverflowPolicy::Truncate => {
                    tracing::warn!(%cell, count = members.len(), hidden, "cell over capacity, truncating");
                }
                OverflowPolicy::Indicator => {
                    let rect = cell_rect(cell, order);
                    overflow.push(OverflowMarker {
                        cell,
                        hidden,
                        anchor: Point {
                            x: rect.x + rect.width,
                            y: rect.y + rect.height,
                        },
                    });
                }
            }
        }

        let origin = cell_origin(cell, order);
        for (i, risk) in members.iter().take(CELL_CAPACITY).enumerate() {
            let slot = Slot::from_index(i);
            bubbles.push(Bubble {
                cell,
                slot,
                center: Point {
                    x: origin.x + options.bubble_inset + slot.col as f64 * options.bubble_spacing,
                    y: origin.y + options.bubble_inset + slot.row as f64 * options.bubble_spacing,
                },
                radius: options.bubble_radius,
                label: risk.id.to_string(),
            });
        }
        tracing::debug!(%cell, placed = members.len().min(CELL_CAPACITY), "cell laid out");
    }

    let x_ticks = labels
        .likelihood
        .iter()
        .enumerate()
        .map(|(i, label)| Tick {
            position: i as f64 + 0.5,
            label: wrap_label(label, options.wrap_width),
        })
        .collect();

    // Tick for display row r carries the label of the impact index shown there
    let y_ticks = (0..GRID_SIZE)
        .map(|row| {
            let impact = (0..GRID_SIZE)
                .find(|&i| order.display_row(i) == row)
                .unwrap_or(row);
            Tick {
                position: row as f64 + 0.5,
                label: wrap_label(&labels.impact[impact], options.wrap_width),
            }
        })
        .collect();

    Ok(GeometricDescription {
        extent: GRID_SIZE,
        highlights,
        bubbles,
        overflow,
        x_axis: Axis {
            title: options.x_title.clone(),
            ticks: x_ticks,
        },
        y_axis: Axis {
            title: options.y_title.clone(),
            ticks: y_ticks,
        },
        impact_order: order,
    })
}
