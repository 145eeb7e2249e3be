//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined and both charts
//! drawn as inline SVG.

use std::f64::consts::PI;
use std::path::Path;

use anyhow::Result;

use classbook_core::chart::{line_series, pie_slices, ChartMode};
use classbook_core::model::{format_average, Status};
use classbook_core::report::ClassReport;
use classbook_core::statistics::ClassStats;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report. `mode` picks which chart is shown first; the
/// other one sits in a collapsed section below it.
pub fn generate_html(report: &ClassReport, mode: ChartMode) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>classbook report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Student management</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Source: <strong>{}</strong> | {} students | {}</p>\n",
        html_escape(&report.source),
        report.rows.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Student list
    html.push_str("<section class=\"students\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Id</th><th>Name</th><th>Average</th><th>Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for row in &report.rows {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            status_class(row.status),
            row.student.id,
            html_escape(&row.student.name),
            format_average(row.student.average),
            row.status,
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Statistics and charts
    html.push_str("<section class=\"stats\">\n");
    html.push_str("<h2>Class statistics</h2>\n");
    match &report.stats {
        Some(stats) => {
            html.push_str(&format!(
                "<p>Class mean: <strong>{:.2}</strong> | Max: <strong>{:.2}</strong> | Min: <strong>{:.2}</strong></p>\n",
                stats.mean, stats.max, stats.min
            ));
            html.push_str(&format!(
                "<p>Passed: {} | Retake: {} | Excluded: {}</p>\n",
                report.breakdown.passed, report.breakdown.retake, report.breakdown.excluded
            ));

            let (first, second) = match mode {
                ChartMode::Line => (line_chart_svg(stats), pie_chart_svg(stats)),
                ChartMode::Pie => (pie_chart_svg(stats), line_chart_svg(stats)),
            };
            html.push_str(&first);
            html.push_str(&format!(
                "<details>\n<summary>Show {} chart</summary>\n",
                mode.toggle()
            ));
            html.push_str(&second);
            html.push_str("</details>\n");
        }
        None => html.push_str("<p class=\"meta\">No students yet.</p>\n"),
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ClassReport, mode: ChartMode, path: &Path) -> Result<()> {
    let html = generate_html(report, mode);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Passed => "passed",
        Status::Retake => "retake",
        Status::Excluded => "excluded",
    }
}

fn line_chart_svg(stats: &ClassStats) -> String {
    let width = 420.0;
    let height = 220.0;
    let pad = 40.0;
    let series = line_series(stats);
    let scale = series.iter().map(|p| p.value).fold(20.0, f64::max);
    let step = (width - 2.0 * pad) / (series.len() - 1).max(1) as f64;

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = pad + i as f64 * step;
            let y = height - pad - p.value.max(0.0) / scale * (height - 2.0 * pad);
            (x, y)
        })
        .collect();

    let mut svg = format!(
        "<svg class=\"line-chart\" width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <rect width=\"{width}\" height=\"{height}\" rx=\"10\" fill=\"#3CB371\"/>\n"
    ));
    let path: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"white\" stroke-width=\"2\"/>\n",
        path.join(" ")
    ));
    for (point, (x, y)) in series.iter().zip(&points) {
        svg.push_str(&format!(
            "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"white\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"white\" text-anchor=\"middle\">{:.2}</text>\n",
            y - 10.0,
            point.value
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"white\" text-anchor=\"middle\">{}</text>\n",
            height - 12.0,
            point.label
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

fn pie_chart_svg(stats: &ClassStats) -> String {
    let (cx, cy, r) = (90.0, 90.0, 80.0);
    let slices = pie_slices(stats);

    let mut svg = String::from(
        "<svg class=\"pie-chart\" width=\"400\" height=\"180\" xmlns=\"http://www.w3.org/2000/svg\">\n",
    );

    let mut angle = -PI / 2.0;
    for slice in slices.iter().filter(|s| s.share > 0.0) {
        if slice.share >= 1.0 {
            svg.push_str(&format!(
                "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\"/>\n",
                slice.color
            ));
            continue;
        }
        let sweep = slice.share * 2.0 * PI;
        let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
        let (x2, y2) = (cx + r * (angle + sweep).cos(), cy + r * (angle + sweep).sin());
        let large_arc = if sweep > PI { 1 } else { 0 };
        svg.push_str(&format!(
            "  <path d=\"M {cx} {cy} L {x1:.2} {y1:.2} A {r} {r} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{}\"/>\n",
            slice.color
        ));
        angle += sweep;
    }

    for (i, slice) in slices.iter().enumerate() {
        let y = 40 + i * 40;
        svg.push_str(&format!(
            "  <rect x=\"200\" y=\"{}\" width=\"14\" height=\"14\" fill=\"{}\"/>\n",
            y - 11,
            slice.color
        ));
        svg.push_str(&format!(
            "  <text x=\"222\" y=\"{y}\" font-size=\"15\" fill=\"#333\">{:.2} {}</text>\n",
            slice.value, slice.label
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --accent: #3CB371; --border: #e5e7eb; --passed: #dcfce7; --retake: #fef9c3; --excluded: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --passed: #064e3b; --retake: #713f12; --excluded: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
header { background: var(--accent); color: white; padding: 1rem; border-radius: 10px; }
h1, h2 { margin-top: 1rem; }
.meta { opacity: 0.8; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.passed { background: var(--passed); }
.retake { background: var(--retake); }
.excluded { background: var(--excluded); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use classbook_core::model::Student;

    fn make_test_report() -> ClassReport {
        ClassReport::new(
            "http://localhost:8000",
            &[
                Student::new(1, "Ana", 12.5),
                Student::new(2, "Bo <script>", 4.0),
                Student::new(3, "Cy", 7.25),
            ],
        )
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report, ChartMode::Line);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Ana"));
        assert!(html.contains("<td>7.25</td>"));
        assert!(html.contains("Class mean: <strong>7.92</strong>"));
        assert!(html.contains("<tr class=\"excluded\">"));
        assert!(html.contains("Show pie chart"));
        assert!(html.contains("class=\"line-chart\""));
        assert!(html.contains("class=\"pie-chart\""));
    }

    #[test]
    fn html_escapes_names() {
        let html = generate_html(&make_test_report(), ChartMode::Pie);
        assert!(!html.contains("Bo <script>"));
        assert!(html.contains("Bo &lt;script&gt;"));
        assert!(html.contains("Show line chart"));
    }

    #[test]
    fn empty_class_has_no_charts() {
        let report = ClassReport::new("test", &[]);
        let html = generate_html(&report, ChartMode::Line);
        assert!(html.contains("No students yet."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn pie_draws_one_wedge_per_positive_slice() {
        let stats = ClassStats {
            count: 3,
            mean: 7.92,
            max: 12.5,
            min: 4.0,
        };
        let svg = pie_chart_svg(&stats);
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("#2196F3"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&report, ChartMode::Line, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
