//! The `classbook chart` command.

use anyhow::Result;

use classbook_core::chart::ChartMode;
use classbook_report::render_chart;

use super::Connection;

const MIN_WIDTH: usize = 10;
const MAX_WIDTH: usize = 500;

pub async fn execute(conn: &Connection, mode: ChartMode, width: usize) -> Result<()> {
    check_width(width)?;

    let controller = conn.open().await?;
    print!("{}", render_chart(mode, controller.state().stats(), width));
    Ok(())
}

fn check_width(width: usize) -> Result<()> {
    anyhow::ensure!(
        (MIN_WIDTH..=MAX_WIDTH).contains(&width),
        "width must be between {MIN_WIDTH} and {MAX_WIDTH}, got {width}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_bounds() {
        assert!(check_width(10).is_ok());
        assert!(check_width(40).is_ok());
        assert!(check_width(500).is_ok());
        assert!(check_width(9).is_err());
        assert!(check_width(501).is_err());
        assert!(check_width(usize::MAX).is_err());
    }
}
