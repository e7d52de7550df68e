use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payslip_engine::{
    api::{AppState, create_router},
    config::ConfigLoader,
};

#[derive(Parser)]
#[command(name = "payslip-engine")]
#[command(about = "HR record store and monthly payslip service")]
struct Cli {
    /// Directory holding tax_rates.yaml and employees.yaml
    #[arg(short, long, default_value = "./config/payroll")]
    config: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP API
    #[arg(short, long, default_value = "3666")]
    port: u16,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "payslip_engine=info,tower_http=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let loader = ConfigLoader::load(&cli.config)?;
    let app = create_router(AppState::new(loader.into_store()?));

    let address = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Payslip engine listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
