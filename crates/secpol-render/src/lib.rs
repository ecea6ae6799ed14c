//! Rendering utilities for human surfaces (Markdown summaries, terminal text).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;

pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableIssue, RenderablePolicy, RenderableRemediation, RenderableReport,
    RenderableVerdict,
};
pub use text::render_text;
