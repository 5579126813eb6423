use std::path::PathBuf;
use thiserror::Error;

/// Every way a report run can fail. Each variant maps to its own process exit
/// code so a scheduler can tell which stage broke without parsing output.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to open config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("failed to build the HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    #[error("failed to build the login request: {0}")]
    LoginRequestBuild(#[source] reqwest::Error),

    #[error("failed to login: {0}")]
    LoginTransport(#[source] reqwest::Error),

    #[error("wrong credentials, server responded with {status} instead of a redirect")]
    WrongCredentials { status: u16 },

    #[error("server didn't return a zbx_session cookie")]
    MissingSessionCookie,

    #[error("failed to build the export CSV request: {0}")]
    ExportRequestBuild(#[source] reqwest::Error),

    #[error("failed to export the CSV: {0}")]
    ExportTransport(#[source] reqwest::Error),

    #[error("export CSV request returned status {status}")]
    ExportStatus { status: u16 },

    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::ConfigRead { .. } => 1,
            ReportError::ConfigParse { .. } | ReportError::ConfigInvalid(_) => 2,
            ReportError::LoginRequestBuild(_) => 3,
            ReportError::LoginTransport(_) => 4,
            ReportError::WrongCredentials { .. } => 5,
            ReportError::ExportRequestBuild(_) => 6,
            ReportError::MissingSessionCookie => 7,
            ReportError::ExportTransport(_) => 8,
            ReportError::ExportStatus { .. } => 9,
            ReportError::ReportWrite { .. } => 10,
            ReportError::ClientInit(_) => 11,
        }
    }
}
