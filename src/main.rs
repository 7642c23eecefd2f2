use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exam_portal::api::{self, AppState};
use exam_portal::config::PortalConfig;
use exam_portal::eligibility;
use exam_portal::models::{Role, Session, User};
use exam_portal::navigation;
use exam_portal::provider::{ExamCatalog, SessionStore};

#[derive(Parser)]
#[command(name = "exam-portal")]
#[command(about = "Session-gated exam registration portal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the portal HTTP server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON file with the exams to serve
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
    /// Show what a viewer would see when opening a path
    Route {
        path: String,

        /// Role of the signed-in viewer; omit for a signed-out viewer
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,

        /// Pretend the session is still resolving
        #[arg(long)]
        loading: bool,
    },
    /// Evaluate availability and registration eligibility for exam counters
    Exam {
        #[arg(long)]
        capacity: u32,

        #[arg(long)]
        enrolled: u32,

        #[arg(long)]
        signed_in: bool,

        #[arg(long)]
        registered: bool,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).ok_or_else(|| format!("unknown role '{}', expected student or admin", s))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "exam_portal=debug,tower_http=debug".into()),
    );

    // stdout carries command output, keep logs on stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(mut config: PortalConfig, port: Option<u16>, seed: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if seed.is_some() {
        config.seed_file = seed;
    }

    let catalog = match &config.seed_file {
        Some(path) => ExamCatalog::from_json_file(path)?,
        None => {
            tracing::warn!("No seed file configured, serving an empty exam catalog");
            ExamCatalog::default()
        }
    };

    let state = AppState::new(SessionStore::new(), catalog, config.guard());
    let app = api::create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting exam portal on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Exam portal listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = PortalConfig::load();

    match cli.command {
        Some(Commands::Serve { port, seed }) => serve(config, port, seed).await?,
        Some(Commands::Route {
            path,
            role,
            loading,
        }) => {
            let session = match (loading, role) {
                (true, _) => Session::loading(),
                (false, Some(role)) => Session::signed_in(User::new("cli", role)),
                (false, None) => Session::signed_out(),
            };
            let screen = navigation::navigate(&session, &path, &config.guard());
            println!("{}", serde_json::to_string_pretty(&screen)?);
        }
        Some(Commands::Exam {
            capacity,
            enrolled,
            signed_in,
            registered,
        }) => {
            let evaluation = eligibility::evaluate_exam(capacity, enrolled, signed_in, registered);
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
            println!("{}", eligibility::availability_message(&evaluation));
        }
        None => serve(config, None, None).await?,
    }

    Ok(())
}
