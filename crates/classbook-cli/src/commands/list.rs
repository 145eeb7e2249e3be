//! The `classbook list` command.

use anyhow::Result;

use super::{stats_lines, students_table, Connection};

pub async fn execute(conn: &Connection) -> Result<()> {
    let controller = conn.open().await?;
    let state = controller.state();

    if state.students().is_empty() {
        println!("No students yet.");
        return Ok(());
    }

    println!("{}", students_table(state.students()));
    println!("{}", stats_lines(state.stats()));
    Ok(())
}
