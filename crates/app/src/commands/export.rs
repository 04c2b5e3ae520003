//! Monthly report export

use std::path::{Path, PathBuf};

use ticketboard_domain::ExportFormat;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Download the monthly report to `dest` (a file, or a directory that gets
/// the default file name). Returns the written path.
pub async fn export_monthly_report(
    ctx: &AppContext,
    format: ExportFormat,
    year: i32,
    month: u32,
    dest: &Path,
) -> Result<PathBuf, String> {
    execute_command(ctx, "export::export_monthly_report", || {
        ctx.exporter.download_to(format, year, month, dest)
    })
    .await
}

/// Direct link to the export, for opening in a browser
pub async fn export_url(
    ctx: &AppContext,
    format: ExportFormat,
    year: i32,
    month: u32,
) -> Result<String, String> {
    execute_command(ctx, "export::export_url", || async {
        Ok(ctx.exporter.export_url(format, year, month)?.to_string())
    })
    .await
}
