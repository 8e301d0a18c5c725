//! discover - TMDB discovery filter CLI.

/// Application configuration (TOML).
mod config;
/// Filter store shared with the menu.
mod store;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, SavedFilter, resolve_config_path};
use crate::store::{FilterStore, MediaCategory};
use crate::tui::{MenuExit, run_filter_menu};
use discover_api::tmdb::{MediaType, TmdbApi, TmdbClient};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive filter menu.
    Menu(MenuArgs),
    /// List TMDB genres for a media type.
    Genres(GenresArgs),
    /// Inspect or reset the saved filter.
    Filter(FilterCommand),
}

/// Arguments for the `menu` subcommand.
#[derive(clap::Args)]
struct MenuArgs {
    /// Category to open the menu under (default: saved category).
    #[arg(long, value_enum)]
    category: Option<MediaCategory>,
}

/// Arguments for the `genres` subcommand.
#[derive(clap::Args)]
struct GenresArgs {
    /// Media type: movie or tv.
    #[arg(long, default_value = "movie")]
    media_type: MediaType,

    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `filter` subcommand.
#[derive(clap::Args)]
struct FilterCommand {
    /// Filter subcommand to run.
    #[command(subcommand)]
    command: FilterSubcommands,
}

/// Available filter subcommands.
#[derive(Subcommand)]
enum FilterSubcommands {
    /// Print the saved filter.
    Show,
    /// Restore the default filter.
    Reset,
}

/// Builds a `TmdbClient` from `TMDB_API_KEY` and the config.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key =
        std::env::var("TMDB_API_KEY").context("TMDB_API_KEY environment variable is required")?;

    let mut builder = TmdbClient::builder(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &config.tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Loads the config at the resolved path.
fn load_config(dir: Option<&PathBuf>) -> Result<(PathBuf, AppConfig)> {
    let config_path =
        resolve_config_path(dir.map(PathBuf::as_path)).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok((config_path, config))
}

/// Logs a saved filter in a readable form.
fn log_filter(saved: &SavedFilter) {
    let state = &saved.state;
    tracing::info!("Category:   {}", saved.category.label());
    tracing::info!("Media type: {}", state.media_type.label());
    tracing::info!("Genre:      {} ({})", state.genre.label, state.genre.value);
    tracing::info!("Years:      {} - {}", state.from_year, state.to_year);
    match state.rating {
        Some(rating) => tracing::info!("Rating:     {rating}/10"),
        None => tracing::info!("Rating:     any"),
    }
}

/// Runs the `menu` subcommand.
///
/// Loads the saved filter, runs the TUI, and saves the filter if it was applied.
///
/// # Errors
///
/// Returns an error if config, client, or TUI operations fail.
#[instrument(skip_all)]
async fn run_menu(args: &MenuArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (config_path, config) = load_config(dir)?;
    let client = Arc::new(build_tmdb_client(&config)?);

    let mut store = config.filter.to_store();
    if let Some(category) = args.category {
        store.set_category(category);
    }

    let outcome = run_filter_menu(client, &config.tmdb.language, &mut store)
        .await
        .context("filter menu TUI failed")?;

    for error in &outcome.fetch_errors {
        tracing::warn!("{error}");
    }

    match outcome.exit {
        MenuExit::Applied => {
            let mut config = config;
            config.filter = SavedFilter::from_store(store);
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved filter to {}", config_path.display());
            log_filter(&config.filter);
        }
        MenuExit::Cancelled => {
            tracing::info!(
                category = store.category().label(),
                "Filter menu cancelled"
            );
        }
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(args: &GenresArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);

    let list = client
        .genre_list(args.media_type, language)
        .await
        .with_context(|| format!("TMDB genre/{}/list request failed", args.media_type))?;

    tracing::info!("{} genres ({}):", args.media_type.label(), list.genres.len());
    tracing::info!("ID\tName");
    for genre in &list.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }

    Ok(())
}

/// Runs the `filter show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_filter_show(dir: Option<&PathBuf>) -> Result<()> {
    let (config_path, config) = load_config(dir)?;
    tracing::info!("Config: {}", config_path.display());
    log_filter(&config.filter);
    Ok(())
}

/// Runs the `filter reset` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
#[instrument(skip_all)]
fn run_filter_reset(dir: Option<&PathBuf>) -> Result<()> {
    let (config_path, mut config) = load_config(dir)?;
    config.filter = SavedFilter::default();
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Reset filter in {}", config_path.display());
    log_filter(&config.filter);
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Menu(args) => run_menu(&args, cli.dir.as_ref()).await,
        Commands::Genres(args) => run_genres(&args, cli.dir.as_ref()).await,
        Commands::Filter(filter) => match filter.command {
            FilterSubcommands::Show => run_filter_show(cli.dir.as_ref()),
            FilterSubcommands::Reset => run_filter_reset(cli.dir.as_ref()),
        },
    }
}
