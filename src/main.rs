use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use patient_registry::config::Config;
use patient_registry::db::Storage;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "patient-registry", about = "Patient registry web application")]
struct Cli {
    /// Configuration file layered under `REGISTRY_*` environment variables.
    #[arg(long, global = true, default_value = patient_registry::config::CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web application (default).
    Serve,
    /// Create the operator account or reset its password.
    Seed {
        #[arg(long)]
        username: String,
        #[arg(long, env = "REGISTRY_SEED_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        credentials_url = %cfg.storage.credentials_url,
        patients_url = %cfg.storage.patients_url,
        templates_dir = %cfg.assets.templates_dir.display(),
        loglevel = %cfg.basic.loglevel
    );

    // Either connection failing is fatal
    let storage = Storage::open(&cfg.storage).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg, storage.clone()).await?,
        Command::Seed { username, password } => {
            patient_registry::service::seed_operator(
                &storage.credentials(),
                &username,
                &password,
                cfg.security.pbkdf2_iterations,
            )
            .await?;
        }
    }

    storage.close().await;
    Ok(())
}

async fn serve(cfg: Config, storage: Storage) -> Result<(), Box<dyn std::error::Error>> {
    let state = patient_registry::router::RegistryState::new(&storage, cfg.assets);
    let app = patient_registry::router::registry_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
