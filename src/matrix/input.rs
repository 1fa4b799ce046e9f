//! Input document for the command-line driver

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{MatrixError, Result};
use super::types::{AxisLabels, CoordinatePolicy, MaterialCellSet, Risk};

/// Risks, material cells and optional axis labels, as read from JSON.
///
/// ```json
/// {
///   "risks": [{"id": 1, "likelihood": 3, "impact": 2}],
///   "material_cells": [[1, 1], [2, 1]],
///   "likelihood_labels": ["..."],
///   "impact_labels": ["..."]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixInput {
    pub risks: Vec<Risk>,
    /// 1-based (likelihood, impact) pairs
    #[serde(default)]
    pub material_cells: Vec<(i64, i64)>,
    #[serde(default)]
    pub likelihood_labels: Option<Vec<String>>,
    #[serde(default)]
    pub impact_labels: Option<Vec<String>>,
}

impl MatrixInput {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MatrixError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Axis labels, falling back to the defaults for any list not given
    pub fn axis_labels(&self) -> Result<AxisLabels> {
        let defaults = AxisLabels::default();
        AxisLabels::new(
            self.likelihood_labels
                .clone()
                .unwrap_or(defaults.likelihood),
            self.impact_labels.clone().unwrap_or(defaults.impact),
        )
    }

    pub fn material(&self, policy: CoordinatePolicy) -> Result<MaterialCellSet> {
        MaterialCellSet::from_scores(self.material_cells.iter().copied(), policy)
    }
}
