//! The `classbook report` command.

use std::path::PathBuf;

use anyhow::Result;

use classbook_core::chart::ChartMode;
use classbook_core::report::ClassReport;
use classbook_report::write_html_report;

use super::Connection;

pub async fn execute(
    conn: &Connection,
    output: Option<PathBuf>,
    format: String,
    mode: ChartMode,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "html" | "json"),
        "unknown format '{format}': expected html or json"
    );

    let controller = conn.open().await?;
    let report = ClassReport::new(controller.store_name(), controller.state().students());

    let path = output.unwrap_or_else(|| {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        PathBuf::from(format!("classbook-report-{timestamp}.{format}"))
    });

    match format.as_str() {
        "json" => report.save_json(&path)?,
        _ => write_html_report(&report, mode, &path)?,
    }
    eprintln!("Report written to: {}", path.display());
    Ok(())
}
