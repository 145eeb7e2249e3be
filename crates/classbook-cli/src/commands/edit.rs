//! The `classbook edit` command.

use anyhow::Result;

use classbook_core::model::format_average;

use super::Connection;

pub async fn execute(
    conn: &Connection,
    id: i64,
    name: Option<String>,
    average: Option<String>,
) -> Result<()> {
    anyhow::ensure!(
        name.is_some() || average.is_some(),
        "nothing to change: pass --name and/or --average"
    );

    let mut controller = conn.open().await?;
    controller.begin_edit(id)?;
    if let Some(name) = name {
        controller.edit_name(name)?;
    }
    if let Some(average) = average {
        controller.edit_average(average)?;
    }
    controller.confirm_edit().await?;

    match controller.state().collection().find(id) {
        Some(s) => println!(
            "Updated student {id}: {} ({}, {})",
            s.name,
            format_average(s.average),
            s.status()
        ),
        None => println!("Updated student {id}."),
    }
    Ok(())
}
