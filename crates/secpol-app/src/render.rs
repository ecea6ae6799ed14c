//! Render use cases: Markdown and terminal text from in-memory reports.

use crate::report::to_renderable;
use secpol_types::SecpolReport;

pub fn render_markdown(report: &SecpolReport) -> String {
    secpol_render::render_markdown(&to_renderable(report))
}

pub fn render_text(report: &SecpolReport) -> String {
    secpol_render::render_text(&to_renderable(report))
}
