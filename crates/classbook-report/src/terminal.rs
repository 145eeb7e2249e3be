//! Plain-text chart rendering for the terminal.

use classbook_core::chart::{line_series, pie_slices, ChartMode, PieSlice};
use classbook_core::statistics::ClassStats;

/// Averages are drawn against at least the full 0-20 grading scale.
const GRADE_SCALE: f64 = 20.0;
const PIE_FILLS: [char; 3] = ['█', '▓', '░'];

/// Render the chart for `mode`, or a placeholder when there is nothing to
/// aggregate.
pub fn render_chart(mode: ChartMode, stats: Option<&ClassStats>, width: usize) -> String {
    match stats {
        None => "No students yet: nothing to chart.\n".to_string(),
        Some(stats) => match mode {
            ChartMode::Line => render_line(stats, width),
            ChartMode::Pie => render_pie(stats, width),
        },
    }
}

/// One horizontal bar per point, in series order.
pub fn render_line(stats: &ClassStats, width: usize) -> String {
    let series = line_series(stats);
    let scale = series
        .iter()
        .map(|p| p.value)
        .fold(GRADE_SCALE, f64::max);
    let label_width = series.iter().map(|p| p.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for point in &series {
        let cells = bar_cells(point.value, scale, width);
        out.push_str(&format!(
            "{:<label_width$} │{}{} {:.2}\n",
            point.label,
            "█".repeat(cells),
            " ".repeat(width - cells),
            point.value,
        ));
    }
    out
}

/// A single stacked bar split by share, followed by a legend.
pub fn render_pie(stats: &ClassStats, width: usize) -> String {
    let slices = pie_slices(stats);
    let cells = allocate_cells(&slices, width);

    let mut out = String::new();
    out.push('│');
    for (fill, n) in PIE_FILLS.iter().zip(&cells) {
        out.extend(std::iter::repeat(*fill).take(*n));
    }
    out.push_str("│\n");

    for (fill, slice) in PIE_FILLS.iter().zip(&slices) {
        out.push_str(&format!(
            "{fill} {:<10} {:>6.2} ({:.1}%)\n",
            slice.label,
            slice.value,
            slice.share * 100.0
        ));
    }
    out
}

fn bar_cells(value: f64, scale: f64, width: usize) -> usize {
    if scale <= 0.0 || !value.is_finite() {
        return 0;
    }
    let cells = (value.max(0.0) / scale * width as f64).round() as usize;
    cells.min(width)
}

/// Split `width` cells by share using largest remainders, so the parts
/// always add up to `width` when any share is positive.
fn allocate_cells(slices: &[PieSlice], width: usize) -> Vec<usize> {
    let exact: Vec<f64> = slices.iter().map(|s| s.share * width as f64).collect();
    let mut cells: Vec<usize> = exact.iter().map(|x| x.floor() as usize).collect();

    if slices.iter().any(|s| s.share > 0.0) {
        let mut remaining = width.saturating_sub(cells.iter().sum());
        let mut order: Vec<usize> = (0..exact.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.total_cmp(&ra)
        });
        for i in order {
            if remaining == 0 {
                break;
            }
            cells[i] += 1;
            remaining -= 1;
        }
    }
    cells
}
