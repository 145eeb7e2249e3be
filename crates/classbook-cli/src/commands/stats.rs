//! The `classbook stats` command.

use anyhow::Result;

use classbook_core::statistics::status_breakdown;

use super::{breakdown_line, stats_lines, Connection};

pub async fn execute(conn: &Connection) -> Result<()> {
    let controller = conn.open().await?;
    let state = controller.state();

    println!("Students: {}", state.students().len());
    println!("{}", stats_lines(state.stats()));
    println!("{}", breakdown_line(&status_breakdown(state.students())));
    Ok(())
}
