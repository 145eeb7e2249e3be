//! Chart data derived from class statistics.
//!
//! Two views of the same three figures: a line chart (mean, min, max) and a
//! pie chart (mean, max, min). Rendering lives in `classbook-report`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::statistics::ClassStats;

/// Which visualization is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Line,
    Pie,
}

impl ChartMode {
    pub fn toggle(self) -> Self {
        match self {
            ChartMode::Line => ChartMode::Pie,
            ChartMode::Pie => ChartMode::Line,
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartMode::Line => write!(f, "line"),
            ChartMode::Pie => write!(f, "pie"),
        }
    }
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartMode::Line),
            "pie" => Ok(ChartMode::Pie),
            other => Err(format!("unknown chart mode: {other}")),
        }
    }
}

/// One labelled point of the line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: f64,
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
    /// Hex colour, `#RRGGBB`.
    pub color: &'static str,
    /// Fraction of the slice total in `[0, 1]`. Zero when the total is not
    /// positive.
    pub share: f64,
}

pub const MEAN_COLOR: &str = "#3CB371";
pub const MAX_COLOR: &str = "#2196F3";
pub const MIN_COLOR: &str = "#F44336";

pub fn line_series(stats: &ClassStats) -> Vec<ChartPoint> {
    vec![
        ChartPoint {
            label: "Class mean",
            value: stats.mean,
        },
        ChartPoint {
            label: "Min",
            value: stats.min,
        },
        ChartPoint {
            label: "Max",
            value: stats.max,
        },
    ]
}

pub fn pie_slices(stats: &ClassStats) -> Vec<PieSlice> {
    let parts = [
        ("Class mean", stats.mean, MEAN_COLOR),
        ("Maximum", stats.max, MAX_COLOR),
        ("Minimum", stats.min, MIN_COLOR),
    ];
    // Negative averages cannot be drawn as a wedge.
    let total: f64 = parts.iter().map(|(_, v, _)| v.max(0.0)).sum();
    parts
        .into_iter()
        .map(|(label, value, color)| PieSlice {
            label,
            value,
            color,
            share: if total > 0.0 {
                value.max(0.0) / total
            } else {
                0.0
            },
        })
        .collect()
}
