// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod parsing;
pub mod zabbix;
pub mod report;
pub mod pipeline;

// Re-export commonly used items
pub use types::*;
pub use error::ReportError;
pub use config::{load_config, load_config_with_env, load_config_from_path, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::parse_problem_records;
pub use zabbix::ZabbixClient;
pub use report::{render_problem_table, report_file_name, ReportDocument};
pub use pipeline::run_report;
