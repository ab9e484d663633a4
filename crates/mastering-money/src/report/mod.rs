//! Report assembly: bundle the scored result with reasons, lay it out in pages, render.

pub mod bundle;
pub mod document;
mod render;

pub use bundle::{AnsweredQuestion, ReportBundle, ThemeBreakdown};
pub use document::{
    ReportBlock, ReportDocument, ReportPage, EMPTY_REPORT_MESSAGE, REPORT_TITLE,
    THEMES_PER_BREAKDOWN_PAGE,
};
pub use render::{render_text, BAR_WIDTH};
