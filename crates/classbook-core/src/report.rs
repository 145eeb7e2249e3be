//! Class report snapshot with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Status, Student};
use crate::statistics::{status_breakdown, ClassStats, StatusBreakdown};

/// A point-in-time summary of the class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Where the listing came from.
    pub source: String,
    pub rows: Vec<ReportRow>,
    /// Absent for an empty class.
    pub stats: Option<ClassStats>,
    pub breakdown: StatusBreakdown,
}

/// One student with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub student: Student,
    pub status: Status,
}

impl ClassReport {
    pub fn new(source: impl Into<String>, students: &[Student]) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            rows: students
                .iter()
                .map(|s| ReportRow {
                    student: s.clone(),
                    status: s.status(),
                })
                .collect(),
            stats: ClassStats::compute(students),
            breakdown: status_breakdown(students),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ClassReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
