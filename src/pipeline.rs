use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::error::ReportError;
use crate::report::ReportDocument;
use crate::types::Config;
use crate::zabbix::ZabbixClient;

/// Log in, export the problem CSV, render both tables and write the report.
/// Returns the path of the written file.
pub async fn run_report(cfg: &Config, now: DateTime<Local>) -> Result<PathBuf, ReportError> {
    let client = ZabbixClient::new(&cfg.base_url, Duration::from_secs(cfg.timeout_secs))?;

    info!("logging in to {}", client.base_url());
    let session = client.login(&cfg.username, &cfg.password).await?;

    info!("exporting problem CSV");
    let raw_csv = client.export_problems_csv(&session).await?;

    let document = ReportDocument::from_csv(&raw_csv);
    document.write_to_dir(&cfg.report_dir, now)
}
