//! Core value types of the risk matrix
//!
//! Risks arrive with 1-based likelihood/impact scores; everything downstream of
//! `Cell` works with 0-based indices into the fixed 6×6 grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::error::{MatrixError, Result};

/// Number of likelihood columns and impact rows
pub const GRID_SIZE: usize = 6;

/// Bubble slots per row (and rows per cell) inside one cell
pub const SUB_GRID_SIZE: usize = 6;

/// Maximum number of bubbles a single cell can show
pub const CELL_CAPACITY: usize = SUB_GRID_SIZE * SUB_GRID_SIZE;

/// Opaque risk identifier, printed inside its bubble
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskId::Int(n) => write!(f, "{}", n),
            RiskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RiskId {
    fn from(n: i64) -> Self {
        RiskId::Int(n)
    }
}

impl From<&str> for RiskId {
    fn from(s: &str) -> Self {
        RiskId::Text(s.to_string())
    }
}

/// A single risk item with 1-based scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    pub likelihood: i64,
    pub impact: i64,
}

impl Risk {
    pub fn new(id: impl Into<RiskId>, likelihood: i64, impact: i64) -> Self {
        Self {
            id: id.into(),
            likelihood,
            impact,
        }
    }
}

/// What to do with scores outside [1, 6]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatePolicy {
    /// Fail with a validation error
    #[default]
    Reject,
    /// Clamp into [1, 6] and log a warning
    Clamp,
}

impl CoordinatePolicy {
    /// Parse from property value (validated against the registry beforehand)
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "clamp" => Self::Clamp,
            _ => Self::Reject,
        }
    }
}

/// A grid cell, 0-based on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub likelihood: usize,
    pub impact: usize,
}

impl Cell {
    /// Build from 0-based indices; `None` if outside the grid
    pub fn new(likelihood: usize, impact: usize) -> Option<Self> {
        if likelihood < GRID_SIZE && impact < GRID_SIZE {
            Some(Self { likelihood, impact })
        } else {
            None
        }
    }

    /// Convert 1-based scores into a cell, applying the coordinate policy
    pub fn from_scores(likelihood: i64, impact: i64, policy: CoordinatePolicy) -> Result<Self> {
        Ok(Self {
            likelihood: score_to_index("likelihood", likelihood, policy)?,
            impact: score_to_index("impact", impact, policy)?,
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(L{}, I{})", self.likelihood + 1, self.impact + 1)
    }
}

fn score_to_index(axis: &str, score: i64, policy: CoordinatePolicy) -> Result<usize> {
    let max = GRID_SIZE as i64;
    if (1..=max).contains(&score) {
        return Ok((score - 1) as usize);
    }
    match policy {
        CoordinatePolicy::Reject => Err(MatrixError::Validation(format!(
            "{} score {} outside [1, {}]",
            axis, score, max
        ))),
        CoordinatePolicy::Clamp => {
            let clamped = score.clamp(1, max);
            tracing::warn!(axis, score, clamped, "score outside grid, clamping");
            Ok((clamped - 1) as usize)
        }
    }
}

/// Cells flagged for the "Material" highlight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialCellSet {
    cells: BTreeSet<Cell>,
}

impl MaterialCellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from 1-based (likelihood, impact) pairs
    pub fn from_scores<I>(pairs: I, policy: CoordinatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut set = Self::new();
        for (likelihood, impact) in pairs {
            set.insert(Cell::from_scores(likelihood, impact, policy)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in grid order (likelihood, then impact)
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl FromIterator<Cell> for MaterialCellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Tick labels for both axes, one per grid column/row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub likelihood: Vec<String>,
    pub impact: Vec<String>,
}

impl AxisLabels {
    /// Check both label lists have exactly one entry per grid line
    pub fn new(likelihood: Vec<String>, impact: Vec<String>) -> Result<Self> {
        for (axis, labels) in [("likelihood", &likelihood), ("impact", &impact)] {
            if labels.len() != GRID_SIZE {
                return Err(MatrixError::Config(format!(
                    "expected {} {} labels, got {}",
                    GRID_SIZE,
                    axis,
                    labels.len()
                )));
            }
        }
        Ok(Self { likelihood, impact })
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        let likelihood = [
            "1-Low (once in 20 years)",
            "2-Minor (once in 10 years)",
            "3-Moderate (once in 5 years)",
            "4-Significant (once in 2 years)",
            "5-Major (once a year)",
            "6-Critical (multiple times a year)",
        ];
        let impact = [
            "1-Low (<$1M)",
            "2-Minor ($1M-$10M)",
            "3-Moderate ($10M-$50M)",
            "4-Significant ($50M-$500M)",
            "5-High (>$500M)",
            "6-Severe (>$1B)",
        ];
        Self {
            likelihood: likelihood.iter().map(|s| s.to_string()).collect(),
            impact: impact.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_scores_in_range() {
        let cell = Cell::from_scores(1, 6, CoordinatePolicy::Reject).unwrap();
        assert_eq!(cell, Cell { likelihood: 0, impact: 5 });
    }

    #[test]
    fn test_cell_from_scores_rejects_out_of_range() {
        assert!(matches!(
            Cell::from_scores(0, 3, CoordinatePolicy::Reject),
            Err(MatrixError::Validation(_))
        ));
        assert!(matches!(
            Cell::from_scores(3, 7, CoordinatePolicy::Reject),
            Err(MatrixError::Validation(_))
        ));
    }

    #[test]
    fn test_cell_from_scores_clamps() {
        let cell = Cell::from_scores(-4, 99, CoordinatePolicy::Clamp).unwrap();
        assert_eq!(cell, Cell { likelihood: 0, impact: 5 });
    }

    #[test]
    fn test_cell_new_bounds() {
        assert!(Cell::new(5, 5).is_some());
        assert!(Cell::new(6, 0).is_none());
    }

    #[test]
    fn test_risk_id_display_and_serde() {
        let ids: Vec<RiskId> = serde_json::from_str(r#"[7, "R-12"]"#).unwrap();
        assert_eq!(ids[0], RiskId::Int(7));
        assert_eq!(ids[1].to_string(), "R-12");
    }

    #[test]
    fn test_material_set_dedups() {
        let set =
            MaterialCellSet::from_scores([(1, 1), (1, 1), (2, 3)], CoordinatePolicy::Reject)
                .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Cell { likelihood: 1, impact: 2 }));
    }

    #[test]
    fn test_axis_labels_count() {
        let five = vec!["a".to_string(); 5];
        let six = vec!["a".to_string(); 6];
        assert!(matches!(
            AxisLabels::new(five, six.clone()),
            Err(MatrixError::Config(_))
        ));
        assert!(AxisLabels::new(six.clone(), six).is_ok());
        assert_eq!(AxisLabels::default().impact.len(), GRID_SIZE);
    }
}
