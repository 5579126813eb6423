use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ReportError;
use crate::parsing::parse_problem_records;
use crate::types::ProblemStatus;

const STYLE: &str = r#"<style>
    table {
        border: 1px solid;
        border-color: black;
        border-collapse: collapse;
    }

    tr {
        border: 1px solid;
        border-color: black;
        border-collapse: collapse;
    }

    td {
        border: 1px solid;
        border-color: black;
        border-collapse: collapse;
    }
</style>"#;

const TABLE_HEADER: &str = "<table><tr><td style=\"text-align: center;\">Host</td><td style=\"text-align: center;\">Problem</td><td style=\"text-align: center;\">Time</td><td style=\"text-align: center;\">Duration</td></tr>\n";

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the rows of `csv_content` whose status is `status` as an HTML table.
/// Cells are host, problem, time, duration, in that order.
pub fn render_problem_table(csv_content: &str, status: ProblemStatus) -> String {
    let mut html = String::from(TABLE_HEADER);
    let mut rows = 0usize;

    for record in parse_problem_records(csv_content) {
        if record.status != Some(status) {
            continue;
        }
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(&record.host),
            html_escape(&record.description),
            html_escape(&record.time),
            html_escape(&record.duration),
        );
        rows += 1;
    }
    html.push_str("</table>");

    info!("{} rows with status {}", rows, status.as_csv_value());
    html
}

/// `report-YYYY-MM-DD-HH-MM-SS.html` for the given local time.
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("report-{}.html", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// The final HTML artifact holding the active and resolved tables.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    html: String,
}

impl ReportDocument {
    pub fn new(active_table: &str, resolved_table: &str) -> Self {
        let mut html = String::from(STYLE);
        let _ = writeln!(
            html,
            "<p style=\"text-align: center\">Active Problems</p>{}<p style=\"text-align: center\">Resolved Problems</p>{}",
            active_table, resolved_table
        );
        Self { html }
    }

    pub fn from_csv(csv_content: &str) -> Self {
        let active = render_problem_table(csv_content, ProblemStatus::Active);
        let resolved = render_problem_table(csv_content, ProblemStatus::Resolved);
        Self::new(&active, &resolved)
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Write the document into `dir`, creating it if needed, and return the
    /// path of the new file.
    pub fn write_to_dir(&self, dir: &Path, now: DateTime<Local>) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(dir).map_err(|source| ReportError::ReportWrite {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(report_file_name(now));
        std::fs::write(&path, &self.html).map_err(|source| ReportError::ReportWrite {
            path: path.clone(),
            source,
        })?;
        info!("report written to {}", path.display());
        Ok(path)
    }
}
