//! classbook-report: chart rendering and report generation.

pub mod html;
pub mod terminal;

pub use html::{generate_html, write_html_report};
pub use terminal::render_chart;
