use std::{net::IpAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use platform_db::RecordStore;
use platform_obs::{TelemetryConfig, init_telemetry};
use products_hr::EmployeeService;

use server::{
    config::AppConfig,
    http::{self, AppState, ServeConfig},
    seed,
};

#[derive(Parser, Debug)]
#[command(name = "hr-server", version, about = "Employee records service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// JSON file with employee documents loaded into the store at startup.
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(TelemetryConfig::default())?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
    }
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let store = Arc::new(RecordStore::new());
    if let Some(path) = &cmd.seed {
        seed::load_employees(&store, path).await?;
    }
    let state = AppState {
        service: EmployeeService::new(store),
        config,
    };
    http::serve((&cmd).into(), state).await
}
