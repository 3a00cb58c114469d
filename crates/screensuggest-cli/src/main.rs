//! screensuggest - movie catalog search CLI.

/// Application configuration (TOML).
#[allow(clippy::module_name_repetitions)]
mod config;
/// Display formatting for movie records.
mod display;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::AppConfig;
use crate::display::{RATING_MAX, RATING_MIN, USER_AVATAR_URL, YEAR_MIN};
use screensuggest_api::{ApiClient, Movie, MovieId, MovieService, SearchFilters, SortKey, SortOrder};
use screensuggest_search::{GenreList, MovieSearch};

/// Default User-Agent sent to the catalog API.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the catalog API base URL.
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Print results as JSON on stdout (logs go to stderr).
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search the movie catalog.
    Search(SearchArgs),
    /// Show one movie's details.
    Movie(MovieArgs),
    /// List genres.
    Genres,
    /// List featured movies.
    Featured,
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Free-text query.
    #[arg(long, short, default_value = "")]
    query: String,

    /// Genre name (e.g. "Drama").
    #[arg(long)]
    genre: Option<String>,

    /// Earliest release year.
    #[arg(long)]
    year_from: Option<i32>,

    /// Latest release year.
    #[arg(long)]
    year_to: Option<i32>,

    /// Minimum rating (0-10).
    #[arg(long)]
    rating_from: Option<f64>,

    /// Maximum rating (0-10).
    #[arg(long)]
    rating_max: Option<f64>,

    /// Sort key: title, year, rating, popularity, or a raw API field.
    #[arg(long)]
    sort_by: Option<SortKey>,

    /// Sort order: asc or desc.
    #[arg(long)]
    sort_order: Option<SortOrder>,

    /// Movies per page (default: `search.page_size` from config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,

    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// Movie ID (numeric or string).
    #[arg(long)]
    id: MovieId,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

/// JSON shape of `search` output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchReport<'a> {
    movies: &'a [Movie],
    total: u32,
    current_page: u32,
    total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Builds the catalog service from config and the `--base-url` override.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_service(config: &AppConfig, base_url: Option<&Url>) -> Result<MovieService<ApiClient>> {
    let base_url = match base_url {
        Some(url) => Some(url.clone()),
        None => config
            .api
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("invalid api.base_url in config")?,
    };

    let mut builder = ApiClient::builder()
        .user_agent(config.api.user_agent.as_deref().unwrap_or(USER_AGENT))
        .timeout(config.api.timeout());
    if let Some(url) = base_url {
        builder = builder.base_url(with_trailing_slash(url));
    }
    let client = builder.build().context("failed to build API client")?;
    tracing::debug!(base_url = %client.base_url(), "API client ready");

    Ok(MovieService::new(client))
}

/// Endpoint paths are joined onto the base, which therefore must end in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Loads the config file selected by `--dir`.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let config_path = AppConfig::path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Writes `value` as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")
}

/// Checks year and rating bounds before any request is made.
///
/// # Errors
///
/// Returns an error naming the first out-of-range flag.
fn validate_search_args(args: &SearchArgs) -> Result<()> {
    let year_max = display::year_max();
    for (flag, year) in [("--year-from", args.year_from), ("--year-to", args.year_to)] {
        if let Some(year) = year
            && !(YEAR_MIN..=year_max).contains(&year)
        {
            bail!("{flag} must be between {YEAR_MIN} and {year_max}");
        }
    }
    if let (Some(from), Some(to)) = (args.year_from, args.year_to)
        && from > to
    {
        bail!("--year-from must not be after --year-to");
    }
    for (flag, rating) in [("--rating-from", args.rating_from), ("--rating-max", args.rating_max)] {
        if let Some(rating) = rating
            && !(RATING_MIN..=RATING_MAX).contains(&rating)
        {
            bail!("{flag} must be between {RATING_MIN} and {RATING_MAX}");
        }
    }
    Ok(())
}

/// Runs the `search` subcommand.
///
/// Applies all filters in one step, then loads further pages until
/// `--pages` pages are loaded or the results run out.
///
/// # Errors
///
/// Returns an error if the arguments are out of range, the config cannot be
/// loaded, or the client fails to build.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, cli: &Cli) -> Result<()> {
    validate_search_args(args)?;
    let config = load_config(cli.dir.as_deref())?;
    let service = build_service(&config, cli.base_url.as_ref())?;

    let defaults = SearchFilters {
        limit: args.limit.unwrap_or(config.search.page_size),
        ..SearchFilters::default()
    };
    let search = MovieSearch::with_config(service, config.search.debounce(), defaults);

    search
        .set_filters(|f| {
            f.query.clone_from(&args.query);
            f.genre.clone_from(&args.genre);
            f.year_from = args.year_from;
            f.year_to = args.year_to;
            f.rating_from = args.rating_from;
            f.rating_max = args.rating_max;
            f.sort_by.clone_from(&args.sort_by);
            f.sort_order = args.sort_order;
        })
        .await;
    for _ in 1..args.pages {
        if !search.has_more_pages() {
            break;
        }
        search.load_more().await;
    }

    let snapshot = search.snapshot();
    if let Some(error) = &snapshot.error {
        tracing::warn!("Search failed: {error}");
    }

    if cli.json {
        return write_json(&SearchReport {
            movies: &snapshot.movies,
            total: snapshot.total,
            current_page: snapshot.current_page,
            total_pages: snapshot.total_pages,
            error: snapshot.error.as_deref(),
        });
    }

    tracing::info!("ID\tTitle\tYear\tRating\tDuration\tGenres");
    for movie in &snapshot.movies {
        tracing::info!("{}", display::movie_row(movie));
    }
    tracing::info!(
        "Page {}/{} - Total: {} movies",
        snapshot.current_page,
        snapshot.total_pages,
        snapshot.total
    );

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_deref())?;
    let service = build_service(&config, cli.base_url.as_ref())?;

    let details = service.movie_by_id(&args.id).await;
    if cli.json {
        return write_json(&details);
    }

    let movie = &details.movie;
    tracing::info!(
        "{} ({})",
        movie.title,
        movie
            .year
            .map_or_else(|| String::from("-"), |y| y.to_string())
    );
    tracing::info!("ID:        {}", movie.id);
    tracing::info!("Director:  {}", movie.director);
    tracing::info!("Cast:      {}", movie.cast.join(", "));
    tracing::info!("Genres:    {}", movie.genres.join(", "));
    tracing::info!(
        "Rating:    {} {}",
        display::render_stars(movie.rating),
        display::format_rating(movie.rating)
    );
    tracing::info!("Duration:  {}", display::format_duration(movie.duration_minutes));
    if let Some(date) = &details.release_date {
        tracing::info!("Released:  {}", display::format_date(date));
    }
    tracing::info!("Votes:     +{} / -{}", details.votes_up, details.votes_down);
    tracing::info!("Poster:    {}", display::poster_url(movie));
    tracing::info!("Synopsis:  {}", movie.synopsis);

    tracing::info!("Comments ({}):", details.comments.len());
    for comment in &details.comments {
        let avatar = if comment.user_avatar_url.is_empty() {
            USER_AVATAR_URL
        } else {
            comment.user_avatar_url.as_str()
        };
        tracing::info!(
            "  {} ({}) <{}>: {}",
            comment.user_name,
            comment.created_at,
            avatar,
            display::truncate_text(&comment.content, 120)
        );
    }

    tracing::info!("Similar ({}):", details.similar_movies.len());
    for similar in &details.similar_movies {
        tracing::info!("  {}", display::movie_row(similar));
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_genres(cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_deref())?;
    let service = build_service(&config, cli.base_url.as_ref())?;

    let list = GenreList::new(service);
    list.load_genres().await;
    if let Some(error) = list.error() {
        tracing::warn!("Loading genres failed: {error}");
    }

    let genres = list.genres();
    if cli.json {
        return write_json(&genres);
    }

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", genres.len());

    Ok(())
}

/// Runs the `featured` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_featured(cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_deref())?;
    let service = build_service(&config, cli.base_url.as_ref())?;

    let movies = service.featured_movies().await;
    if cli.json {
        return write_json(&movies);
    }

    tracing::info!("ID\tTitle\tYear\tRating\tDuration\tGenres");
    for movie in &movies {
        tracing::info!("{}", display::movie_row(movie));
    }
    tracing::info!("Total: {} featured movies", movies.len());

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::default()
        .save(config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
#[instrument(skip_all)]
fn run_config_show(config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path).context("failed to load config")?;
    let content = toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
    tracing::info!("# {}", config_path.display());
    for line in content.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Installs the global tracing subscriber.
///
/// Logs go to stdout, or to stderr when stdout carries JSON output.
fn init_tracing(json: bool) {
    let writer = if json {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(writer);

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
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match &cli.command {
        Commands::Search(args) => run_search(args, &cli).await,
        Commands::Movie(args) => run_movie(args, &cli).await,
        Commands::Genres => run_genres(&cli).await,
        Commands::Featured => run_featured(&cli).await,
        Commands::Config(cmd) => {
            let config_path = AppConfig::path(cli.dir.as_deref())
                .context("failed to resolve config path")?;
            match cmd.command {
                ConfigSubcommands::Init { force } => run_config_init(&config_path, force),
                ConfigSubcommands::Show => run_config_show(&config_path),
            }
        }
    }
}
