//! The `classbook delete` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use super::Connection;

pub async fn execute(conn: &Connection, id: i64, yes: bool) -> Result<()> {
    let mut controller = conn.open().await?;
    controller.request_delete(id)?;

    let name = controller
        .state()
        .collection()
        .find(id)
        .map(|s| s.name.clone())
        .unwrap_or_default();

    if !yes && !confirm(&format!("Delete {name} (id {id})? [y/N] "))? {
        controller.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }

    controller.confirm_delete().await?;
    println!(
        "Deleted {name}. {} student(s) left.",
        controller.state().students().len()
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
