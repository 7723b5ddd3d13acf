/// Cadence - terminal media session
use cadence_cli::{commands, config::CliConfig, load_catalog, open_session, session};
use cadence_core::{LengthFilter, MediaKind, SearchFilters};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "cadence_cli=info,cadence_playback=info,cadence_storage=info";

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Browse a media catalog and drive a playback session", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog JSON, overrides the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level for cadence crates (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Free-text query (empty lists everything that passes the filters)
        #[arg(default_value = "")]
        query: String,
        /// Only this media kind (music, podcast, video)
        #[arg(long, value_parser = commands::parse_kind)]
        kind: Option<MediaKind>,
        /// Duration bucket (any, short, medium, long)
        #[arg(long, value_parser = commands::parse_length, default_value = "any")]
        length: LengthFilter,
        /// Exact language
        #[arg(long)]
        language: Option<String>,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
    },
    /// Browse the catalog by category
    Library {
        /// Only this media kind (music, podcast, video)
        #[arg(long, value_parser = commands::parse_kind)]
        kind: Option<MediaKind>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// List playlists
    Playlists,
    /// Items with a stored resume point
    Continue,
    /// Show the persisted queue
    Queue,
    /// Start an interactive session on stdin
    Session,
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(format!(
            "cadence_cli={level},cadence_playback={level},cadence_storage={level},cadence_core={level}"
        )),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search {
            query,
            kind,
            length,
            language,
            category,
        } => {
            let catalog = load_catalog(&config)?;
            let filters = SearchFilters {
                kind,
                length,
                language,
                category,
            };
            commands::search_catalog(&mut out, &catalog, &query, &filters)?;
        }
        Commands::Library { kind, category } => {
            let catalog = load_catalog(&config)?;
            commands::list_library(&mut out, &catalog, kind, category.as_deref())?;
        }
        Commands::Playlists => {
            let catalog = load_catalog(&config)?;
            commands::list_playlists(&mut out, &catalog)?;
        }
        Commands::Continue => {
            let catalog = load_catalog(&config)?;
            let session = open_session(&config)?;
            commands::continue_listening(&mut out, &session, &catalog)?;
        }
        Commands::Queue => {
            let session = open_session(&config)?;
            commands::print_queue(&mut out, &session)?;
        }
        Commands::Session => {
            let catalog = load_catalog(&config)?;
            let mut session = open_session(&config)?;
            tracing::info!("Starting interactive session");
            session::run(&mut session, &catalog, io::stdin().lock(), out)?;
        }
    }

    Ok(())
}
