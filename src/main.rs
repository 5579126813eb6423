use anyhow::Result;
use chrono::Local;
use tracing::{error, info};

use zabbix_problem_report::{load_config, run_report, ReportError};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}

async fn run() -> Result<(), ReportError> {
    let cfg = load_config()?;
    let path = run_report(&cfg, Local::now()).await?;
    info!("done, report at {}", path.display());
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
}
