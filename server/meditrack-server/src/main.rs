use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meditrack_server::{create_app, MediTrackServer, ServerConfig};

/// MediTrack HTTP Server
#[derive(Parser, Debug)]
#[command(name = "meditrack-server")]
#[command(about = "Practice management HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Starting MediTrack HTTP server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = MediTrackServer::new(ServerConfig::from_env());
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.host, args.port)).await?;

    info!(
        "MediTrack server running on http://{}:{}",
        args.host, args.port
    );
    info!(
        "Health check available at: http://{}:{}/health",
        args.host, args.port
    );
    info!("API available at: http://{}:{}/api", args.host, args.port);
    info!(
        "API docs available at: http://{}:{}/docs",
        args.host, args.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("meditrack_server={},tower_http=info", level).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
