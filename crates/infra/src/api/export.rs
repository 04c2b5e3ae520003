//! Monthly report export
//!
//! The backend renders the file; the client only builds the download URL
//! and streams the response body to disk.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use ticketboard_domain::{ExportFormat, Result, TicketboardError};
use tracing::{info, instrument, warn};
use url::Url;

use super::client::ApiClient;
use crate::errors::InfraError;

/// Downloads rendered monthly reports
#[derive(Clone)]
pub struct ReportExporter {
    client: ApiClient,
}

impl ReportExporter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(format: ExportFormat) -> String {
        format!("/report/export/{format}/monthly")
    }

    /// Absolute download URL of the report for `year`-`month`.
    ///
    /// # Errors
    /// `InvalidInput` for months outside 1-12, `Config` when the base URL
    /// does not parse.
    pub fn export_url(&self, format: ExportFormat, year: i32, month: u32) -> Result<Url> {
        validate_month(month)?;
        let mut url = Url::parse(&self.client.url(&Self::path(format)))
            .map_err(|e| TicketboardError::Config(format!("Invalid export URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("year", &year.to_string())
            .append_pair("month", &month.to_string());
        Ok(url)
    }

    /// Default file name of an exported report
    pub fn file_name(format: ExportFormat, year: i32, month: u32) -> String {
        format!("monthly-report-{year:04}-{month:02}.{}", format.extension())
    }

    /// Stream the report to `dest`; a directory receives the default file
    /// name. Returns the written path.
    ///
    /// # Errors
    /// Request failures as for any API call; I/O failures while writing.
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub async fn download_to(
        &self,
        format: ExportFormat,
        year: i32,
        month: u32,
        dest: &Path,
    ) -> Result<PathBuf> {
        validate_month(month)?;
        let target = if dest.is_dir() { dest.join(Self::file_name(format, year, month)) } else { dest.to_path_buf() };

        let query = [("year", year.to_string()), ("month", month.to_string())];
        let response = self.client.get_stream(&Self::path(format), &query).await?;

        // The body lands in a sibling ".part" file, renamed into place once complete
        let partial = partial_path(&target);
        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    warn!(path = %partial.display(), error = %cleanup, "Failed to remove partial export");
                }
                return Err(err);
            }
        };
        if let Err(err) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(io_error(err));
        }

        info!(%format, year, month, bytes = written, path = %target.display(), "Report exported");
        Ok(target)
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TicketboardError::from(InfraError::from(e)))?;
        file.write_all(&chunk).await.map_err(io_error)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_error)?;
    Ok(written)
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}

fn io_error(err: std::io::Error) -> TicketboardError {
    InfraError::from(err).into()
}

fn validate_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(TicketboardError::InvalidInput(format!("Month must be between 1 and 12 (got {month})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ApiClientConfig;

    fn exporter() -> ReportExporter {
        let client = ApiClient::new(ApiClientConfig {
            base_url: "http://localhost:5000/api".into(),
            ..ApiClientConfig::default()
        })
        .unwrap();
        ReportExporter::new(client)
    }

    #[test]
    fn export_url_carries_year_and_month() {
        let url = exporter().export_url(ExportFormat::Pdf, 2025, 3).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/report/export/pdf/monthly?year=2025&month=3");
    }

    #[test]
    fn export_url_rejects_bad_month() {
        assert!(exporter().export_url(ExportFormat::Excel, 2025, 0).is_err());
    }

    #[test]
    fn partial_file_sits_next_to_target() {
        let partial = partial_path(Path::new("/tmp/out/monthly-report-2025-03.pdf"));
        assert_eq!(partial, Path::new("/tmp/out/monthly-report-2025-03.pdf.part"));
    }

    #[test]
    fn default_file_name() {
        assert_eq!(ReportExporter::file_name(ExportFormat::Excel, 2025, 3), "monthly-report-2025-03.xlsx");
    }
}
