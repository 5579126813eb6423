use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_REPORT_DIR: &str = "report";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub base_url: String,
    pub report_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Config {
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .field("base_url", &self.base_url)
            .field("report_dir", &self.report_dir)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// On-disk shape of `config.yaml`.
#[derive(Deserialize)]
pub struct ConfigFile {
    pub zabbix_username: String,
    pub zabbix_password: String,
    pub zabbix_url: String,
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Value of the `zbx_session` cookie returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemStatus {
    Active,
    Resolved,
}

impl ProblemStatus {
    /// The literal the export writes into the status column.
    pub fn as_csv_value(&self) -> &'static str {
        match self {
            ProblemStatus::Active => "PROBLEM",
            ProblemStatus::Resolved => "RESOLVED",
        }
    }

    pub fn from_csv_value(value: &str) -> Option<Self> {
        match value {
            "PROBLEM" => Some(ProblemStatus::Active),
            "RESOLVED" => Some(ProblemStatus::Resolved),
            _ => None,
        }
    }
}

/// One row of the problem export. `status` is `None` for rows whose status
/// column holds anything outside the known set, such as the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRecord {
    pub time: String,
    pub status: Option<ProblemStatus>,
    pub host: String,
    pub description: String,
    pub duration: String,
}
