//! council-report
//!
//! Renders a stored council conversation (the independent member responses
//! plus the synthesized final resolution) into a paginated, styled PDF
//! using the pdf-writer library.
//!
//! The layout engine walks the conversation record and emits an ordered
//! sequence of draw operations; the page canvas executes them, handling
//! line wrapping and overflow page breaks.

pub mod canvas;
pub mod cli;
pub mod conversation;
pub mod error;
pub mod fonts;
pub mod format;
pub mod layout;
pub mod loader;
pub mod logo;
pub mod ops;
pub mod theme;
mod winansi;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::canvas::{PageCanvas, PageChrome};
use crate::error::{ReportError, ReportResult};
use crate::fonts::FontProvider;
use crate::layout::{LayoutEngine, ReportConfig};
use crate::loader::ConversationStore;
use crate::logo::Logo;
use crate::theme::labels;

/// Fixed relative path the optional header logo is looked up at.
const LOGO_PATH: &str = "logo.png";

/// Render one conversation to `<out_dir>/<id>.pdf`.
///
/// Loads the record, plans the layout and only then touches the output
/// directory, so input failures never leave a partial file behind.
/// Returns the path the report was written to.
pub fn generate_report(
    id: &str,
    store_dir: &Path,
    out_dir: &Path,
    config: ReportConfig,
) -> ReportResult<PathBuf> {
    let record = ConversationStore::new(store_dir).load(id)?;
    let ops = LayoutEngine::new(config).plan(&record);

    let chrome = PageChrome {
        title: labels::REPORT_TITLE.to_string(),
        logo: Logo::load(Path::new(LOGO_PATH)),
    };
    let mut canvas = PageCanvas::new(FontProvider::new(), chrome);
    canvas.run(&ops);
    let bytes = canvas.finish();

    fs::create_dir_all(out_dir).map_err(ReportError::OutputWrite)?;
    let out_path = out_dir.join(format!("{id}.pdf"));
    fs::write(&out_path, bytes).map_err(ReportError::OutputWrite)?;
    info!("report written to {}", out_path.display());
    Ok(out_path)
}
