//! Subcommand implementations and the shared store connection.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use classbook_client::config::load_config_from;
use classbook_client::create_store;
use classbook_core::model::{format_average, Student};
use classbook_core::statistics::{ClassStats, StatusBreakdown};
use classbook_core::Controller;

pub mod add;
pub mod chart;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod report;
pub mod shell;
pub mod stats;

/// Where to find the store, as given on the command line.
pub struct Connection {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
}

impl Connection {
    /// Build a controller and load the current collection.
    pub async fn open(&self) -> Result<Controller> {
        let mut controller = self.controller()?;
        controller.refresh().await?;
        Ok(controller)
    }

    /// Build a controller without fetching anything yet.
    pub fn controller(&self) -> Result<Controller> {
        let mut config = load_config_from(self.config_path.as_deref())?;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        tracing::debug!(base_url = %config.base_url, "connecting to student store");
        let store = create_store(&config)?;
        Ok(Controller::new(Arc::new(store)))
    }
}

pub(crate) fn students_table(students: &[Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Average", "Status"]);
    for s in students {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.name),
            Cell::new(format_average(s.average)),
            Cell::new(s.status()),
        ]);
    }
    table
}

pub(crate) fn stats_lines(stats: Option<&ClassStats>) -> String {
    match stats {
        Some(s) => format!(
            "Class mean: {:.2}\nMax: {:.2}\nMin: {:.2}",
            s.mean, s.max, s.min
        ),
        None => "Class mean: n/a\nMax: n/a\nMin: n/a".to_string(),
    }
}

pub(crate) fn breakdown_line(breakdown: &StatusBreakdown) -> String {
    format!(
        "Passed: {} | Retake: {} | Excluded: {}",
        breakdown.passed, breakdown.retake, breakdown.excluded
    )
}
