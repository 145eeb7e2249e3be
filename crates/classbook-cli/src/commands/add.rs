//! The `classbook add` command.

use anyhow::Result;

use super::Connection;

pub async fn execute(conn: &Connection, name: String, average: String) -> Result<()> {
    let mut controller = conn.controller()?;
    controller.add(&name, &average).await?;
    println!(
        "Added {}. The class now has {} student(s).",
        name.trim(),
        controller.state().students().len()
    );
    Ok(())
}
