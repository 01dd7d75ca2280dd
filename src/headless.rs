use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::render::render_to_file;
use crate::table::format_table;
use crate::ui::viewdata::{DataSources, ViewFrame};
use crate::view::ViewOption;

/// Output file for a view, e.g. `teen_depression_all-teens.png`.
pub fn output_path(out_dir: &Path, view: ViewOption, ext: &str) -> PathBuf {
    out_dir.join(format!("teen_depression_{}.{ext}", view.slug()))
}

/// Renders each view to `out_dir` and returns the written paths together with
/// the text rendering of the raw UK table.
pub fn run(
    views: &[ViewOption],
    sources: &DataSources,
    out_dir: &Path,
    ext: &str,
    size: (u32, u32),
) -> Result<(Vec<PathBuf>, String)> {
    create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(views.len());
    let mut table = String::new();
    for &view in views {
        let frame = ViewFrame::load(view, sources)
            .with_context(|| format!("building view `{}`", view.slug()))?;
        let path = output_path(out_dir, view, ext);
        render_to_file(&frame.figure, &path, size)?;
        if table.is_empty() {
            table = match &frame.table {
                Ok(raw) => format_table(raw),
                Err(err) => format!("UK table unavailable: {err}\n"),
            };
        }
        written.push(path);
    }
    info!("rendered {} view(s) to {}", written.len(), out_dir.display());
    Ok((written, table))
}
