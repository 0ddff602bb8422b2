//! Atelier CLI
//!
//! Command-line interface for Atelier - browse a studio's published content.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use atelier_core::models::{ExhibitionStatus, ProjectStatus};
use atelier_core::queries::{artworks, exhibitions, projects};
use atelier_core::{
    AssetUrls, Backend, ContentClient, Environment, HttpBackend, ImageFormat, ImageOptions,
    MemoryStore, Page,
};

mod commands;
mod output;

use commands::artworks::Filter;
use commands::catalog::Vocabulary;
use commands::Session;
use output::{Output, OutputFormat};

/// Variable holding the log filter, e.g. `ATELIER_LOG=debug`
const LOG_ENV: &str = "ATELIER_LOG";

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Atelier - query an art studio's published content")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query an NDJSON dataset export instead of the hosted store
    #[arg(long, global = true, value_name = "PATH")]
    dataset_file: Option<PathBuf>,

    /// Print the compiled queries instead of running them
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Artist and collaborator profiles
    People {
        #[command(subcommand)]
        command: PeopleCommands,
    },
    /// Artworks
    Artworks {
        #[command(subcommand)]
        command: ArtworkCommands,
    },
    /// Projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Exhibitions
    Exhibitions {
        #[command(subcommand)]
        command: ExhibitionCommands,
    },
    /// List awards
    Awards {
        /// Only awards received by this profile
        #[arg(short, long, value_name = "SLUG")]
        profile: Option<String>,
    },
    /// Venues and studios
    Locations {
        #[command(subcommand)]
        command: LocationCommands,
    },
    /// List a controlled vocabulary
    Taxonomy {
        #[arg(value_enum)]
        vocabulary: Vocabulary,
    },
    /// Show site-wide settings
    Settings,
    /// Search artworks, projects and people
    Search {
        /// Search term (`*` wildcards are ignored)
        term: String,
    },
    /// Show any document by id
    Document {
        id: String,
    },
    /// Build CDN URLs for assets
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Show configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum PeopleCommands {
    /// List all profiles
    #[command(alias = "ls")]
    List,
    /// Show a profile with its work
    Show { slug: String },
}

#[derive(Subcommand)]
enum ArtworkCommands {
    /// List artworks, newest first
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value_t = Page::DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Only works by this profile
        #[arg(long, value_name = "SLUG", conflicts_with_all = ["project", "technique", "tag"])]
        person: Option<String>,
        /// Only works in this project
        #[arg(long, value_name = "SLUG", conflicts_with_all = ["technique", "tag"])]
        project: Option<String>,
        /// Only works using this technique
        #[arg(long, value_name = "SLUG", conflicts_with = "tag")]
        technique: Option<String>,
        /// Only works with this tag
        #[arg(long, value_name = "SLUG")]
        tag: Option<String>,
    },
    /// List featured artworks
    Featured {
        #[arg(long, default_value_t = artworks::FEATURED_LIMIT)]
        limit: usize,
    },
    /// Show an artwork
    Show { slug: String },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects
    #[command(alias = "ls")]
    List {
        /// Only projects with this status (planning, inProgress, completed, cancelled, archived)
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    /// List featured projects
    Featured {
        #[arg(long, default_value_t = projects::FEATURED_LIMIT)]
        limit: usize,
    },
    /// Show a project with its artworks
    Show { slug: String },
}

#[derive(Subcommand)]
enum ExhibitionCommands {
    /// List all exhibitions, latest first
    #[command(alias = "ls")]
    List,
    /// Upcoming exhibitions, soonest first
    Upcoming,
    /// Exhibitions open now
    Current,
    /// Past exhibitions
    Past {
        #[arg(long, default_value_t = exhibitions::PAST_LIMIT)]
        limit: usize,
    },
    /// Show an exhibition
    Show { slug: String },
}

#[derive(Subcommand)]
enum LocationCommands {
    /// List locations
    #[command(alias = "ls")]
    List,
    /// Show a location with its exhibitions
    Show { slug: String },
}

#[derive(Subcommand)]
enum AssetCommands {
    /// Transformed image URL
    Image {
        /// Image reference, e.g. image-abc123-800x600-jpg
        reference: String,
        #[arg(long, default_value_t = ImageOptions::DEFAULT_WIDTH)]
        width: u32,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long, default_value_t = ImageOptions::DEFAULT_QUALITY)]
        quality: u8,
        #[arg(long, default_value_t = ImageFormat::Webp)]
        format: ImageFormat,
    },
    /// Image URLs at the standard breakpoints
    Responsive { reference: String },
    /// Pixel size of an image
    Dimensions { reference: String },
    /// Download URL of a file, e.g. file-abc123-pdf
    File { reference: String },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output).await;
    if let Err(e) = &result {
        let hint = e
            .downcast_ref::<atelier_core::Error>()
            .and_then(atelier_core::Error::recovery_suggestion);
        if let (Some(hint), false) = (hint, output.is_quiet()) {
            eprintln!("hint: {}", hint);
        }
    }
    result
}

/// Install the stderr log subscriber, filtered by `ATELIER_LOG`
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Commands that don't need a store
    match cli.command {
        Commands::Config { command } => return handle_config_command(command, config_path, output),
        Commands::Asset { command } => return handle_asset_command(command, config_path, output),
        _ => {}
    }

    if let Some(path) = &cli.dataset_file {
        let client = ContentClient::new(open_dataset(path)?, Environment::Development);
        return dispatch(cli.command, &session(&client, output, cli.explain)).await;
    }

    if cli.explain {
        // Explained queries never reach a store
        let client = ContentClient::new(MemoryStore::new(), Environment::Development);
        return dispatch(cli.command, &session(&client, output, true)).await;
    }

    let config = commands::config::load(config_path)?;
    let backend = HttpBackend::new(&config).context("Failed to create HTTP client")?;
    let client = ContentClient::new(backend, config.environment);
    dispatch(cli.command, &session(&client, output, false)).await
}

fn session<'a, B>(client: &'a ContentClient<B>, output: &'a Output, explain: bool) -> Session<'a, B> {
    Session {
        client,
        output,
        explain,
    }
}

fn open_dataset(path: &Path) -> Result<MemoryStore> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset '{}'", path.display()))?;
    let store = MemoryStore::from_ndjson(BufReader::new(file))
        .with_context(|| format!("Failed to load dataset '{}'", path.display()))?;
    tracing::debug!(documents = store.len(), path = %path.display(), "Loaded dataset");
    Ok(store)
}

async fn dispatch<B: Backend>(command: Commands, session: &Session<'_, B>) -> Result<()> {
    match command {
        Commands::People { command } => handle_people_command(command, session).await,
        Commands::Artworks { command } => handle_artwork_command(command, session).await,
        Commands::Projects { command } => handle_project_command(command, session).await,
        Commands::Exhibitions { command } => handle_exhibition_command(command, session).await,
        Commands::Awards { profile } => {
            commands::catalog::awards(session, profile.as_deref()).await
        }
        Commands::Locations { command } => match command {
            LocationCommands::List => commands::catalog::locations(session).await,
            LocationCommands::Show { slug } => commands::catalog::location(session, &slug).await,
        },
        Commands::Taxonomy { vocabulary } => {
            commands::catalog::vocabulary(session, vocabulary).await
        }
        Commands::Settings => commands::catalog::settings(session).await,
        Commands::Search { term } => commands::search::run(session, &term).await,
        Commands::Document { id } => commands::catalog::document(session, &id).await,
        Commands::Config { .. } => unreachable!(), // Handled in run
        Commands::Asset { .. } => unreachable!(),  // Handled in run
    }
}

async fn handle_people_command<B: Backend>(
    command: PeopleCommands,
    session: &Session<'_, B>,
) -> Result<()> {
    match command {
        PeopleCommands::List => commands::people::list(session).await,
        PeopleCommands::Show { slug } => commands::people::show(session, &slug).await,
    }
}

async fn handle_artwork_command<B: Backend>(
    command: ArtworkCommands,
    session: &Session<'_, B>,
) -> Result<()> {
    match command {
        ArtworkCommands::List {
            limit,
            offset,
            person,
            project,
            technique,
            tag,
        } => {
            let filter = match (person, project, technique, tag) {
                (Some(slug), ..) => Filter::Person(slug),
                (_, Some(slug), ..) => Filter::Project(slug),
                (_, _, Some(slug), _) => Filter::Technique(slug),
                (_, _, _, Some(slug)) => Filter::Tag(slug),
                _ => Filter::None,
            };
            commands::artworks::list(session, filter, Page::new(limit, offset)).await
        }
        ArtworkCommands::Featured { limit } => commands::artworks::featured(session, limit).await,
        ArtworkCommands::Show { slug } => commands::artworks::show(session, &slug).await,
    }
}

async fn handle_project_command<B: Backend>(
    command: ProjectCommands,
    session: &Session<'_, B>,
) -> Result<()> {
    match command {
        ProjectCommands::List { status } => commands::projects::list(session, status).await,
        ProjectCommands::Featured { limit } => commands::projects::featured(session, limit).await,
        ProjectCommands::Show { slug } => commands::projects::show(session, &slug).await,
    }
}

async fn handle_exhibition_command<B: Backend>(
    command: ExhibitionCommands,
    session: &Session<'_, B>,
) -> Result<()> {
    use commands::exhibitions::{list, show};

    match command {
        ExhibitionCommands::List => list(session, None, exhibitions::PAST_LIMIT).await,
        ExhibitionCommands::Upcoming => {
            list(session, Some(ExhibitionStatus::Upcoming), exhibitions::PAST_LIMIT).await
        }
        ExhibitionCommands::Current => {
            list(session, Some(ExhibitionStatus::Current), exhibitions::PAST_LIMIT).await
        }
        ExhibitionCommands::Past { limit } => {
            list(session, Some(ExhibitionStatus::Past), limit).await
        }
        ExhibitionCommands::Show { slug } => show(session, &slug).await,
    }
}

fn handle_asset_command(
    command: AssetCommands,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    use commands::asset;

    // Only URL building needs the project and dataset
    let urls = || commands::config::load(config_path).map(|config| AssetUrls::from_config(&config));

    match command {
        AssetCommands::Image {
            reference,
            width,
            height,
            quality,
            format,
        } => {
            let options = ImageOptions {
                width,
                height,
                quality,
                format,
            };
            asset::image(&urls()?, &reference, options, output)
        }
        AssetCommands::Responsive { reference } => asset::responsive(&urls()?, &reference, output),
        AssetCommands::Dimensions { reference } => asset::dimensions(&reference, output),
        AssetCommands::File { reference } => asset::file(&urls()?, &reference, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Path) => commands::config::path(config_path, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_artwork_filters_are_exclusive() {
        let parsed = Cli::try_parse_from([
            "atelier", "artworks", "list", "--person", "ada", "--tag", "light",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "atelier", "projects", "list", "--status", "inProgress", "--explain", "--json",
        ])
        .unwrap();
        assert!(cli.explain && cli.json);
        assert!(matches!(
            cli.command,
            Commands::Projects {
                command: ProjectCommands::List {
                    status: Some(ProjectStatus::InProgress)
                }
            }
        ));
    }

    #[tokio::test]
    async fn test_dispatch_against_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            concat!(
                r#"{"_id":"person-ada","_type":"person","firstName":"Ada","lastName":"Schork","slug":{"current":"ada-schork"}}"#,
                "\n",
                r#"{"_id":"tag-light","_type":"tag","title":"Light","slug":{"current":"light"}}"#,
                "\n"
            )
            .as_bytes(),
        )
        .unwrap();

        let client = ContentClient::new(open_dataset(file.path()).unwrap(), Environment::Development);
        let output = Output::new(OutputFormat::Quiet);
        let session = session(&client, &output, false);

        let show = |slug: &str| Commands::People {
            command: PeopleCommands::Show {
                slug: slug.to_string(),
            },
        };
        assert!(dispatch(show("ada-schork"), &session).await.is_ok());
        assert!(dispatch(show("nobody"), &session).await.is_err());
        assert!(dispatch(
            Commands::Taxonomy {
                vocabulary: Vocabulary::Tags
            },
            &session
        )
        .await
        .is_ok());
        assert!(dispatch(
            Commands::Search {
                term: "schork".into()
            },
            &session
        )
        .await
        .is_ok());
    }
}
