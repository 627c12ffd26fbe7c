use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compdoc::config::CompdocConfig;
use compdoc::error::CatalogError;
use compdoc::models::{PageInput, PageLayout};
use compdoc::{api, render, Catalog};

#[derive(Parser)]
#[command(name = "compdoc")]
#[command(about = "Component metadata loader for documentation sites")]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every metadata document under PATH
    Check {
        /// Metadata document or directory (defaults to the configured metadata_dir)
        path: Option<PathBuf>,
    },
    /// Print a validated source as JSON
    Show { path: PathBuf, name: String },
    /// Print a source's fields as a tree
    Fields { path: PathBuf, name: String },
    /// Lay out a page from a JSON page input file
    Page {
        file: PathBuf,

        /// Print the table of contents as an outline instead of the layout
        #[arg(long)]
        outline: bool,
    },
    /// Serve the validated catalog as JSON
    Serve {
        /// Metadata document or directory (defaults to the configured metadata_dir)
        path: Option<PathBuf>,

        /// Port for HTTP API (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Initialize tracing with output to stderr so stdout stays clean for command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "compdoc=info,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load a catalog, logging every rejected source before failing.
fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    match Catalog::load(path) {
        Ok(catalog) => Ok(catalog),
        Err(CatalogError::Invalid(failures)) => {
            for failure in &failures {
                tracing::error!("{}", failure);
            }
            anyhow::bail!(
                "{} invalid source(s) in {}",
                failures.len(),
                path.display()
            )
        }
        Err(e) => Err(e.into()),
    }
}

fn source_from(path: &Path, name: &str) -> anyhow::Result<compdoc::models::Source> {
    let catalog = load_catalog(path)?;
    catalog
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = CompdocConfig::load(cli.config.as_deref());

    match cli.command {
        Some(Commands::Check { path }) => {
            let path = path.unwrap_or_else(|| config.metadata_dir.clone());
            let catalog = load_catalog(&path)?;
            println!("{} source(s) valid in {}", catalog.len(), path.display());
        }
        Some(Commands::Show { path, name }) => {
            let source = source_from(&path, &name)?;
            println!("{}", serde_json::to_string_pretty(&source)?);
        }
        Some(Commands::Fields { path, name }) => {
            let source = source_from(&path, &name)?;
            print!("{}", render::render_fields(&name, source.fields_list()));
        }
        Some(Commands::Page { file, outline }) => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let input: PageInput = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            if outline {
                let headings = input.headings.as_deref().unwrap_or_default();
                print!("{}", render::render_outline(headings));
            } else {
                let layout = PageLayout::from_input(&input, &config.site);
                println!("{}", serde_json::to_string_pretty(&layout)?);
            }
        }
        Some(Commands::Serve { path, port }) => {
            let path = path.unwrap_or_else(|| config.metadata_dir.clone());
            let port = port.unwrap_or(config.port);
            serve(&path, port, config).await?;
        }
        None => {
            // Default: validate the configured metadata directory
            let path = config.metadata_dir.clone();
            let catalog = load_catalog(&path)?;
            println!("{} source(s) valid in {}", catalog.len(), path.display());
        }
    }

    Ok(())
}

async fn serve(path: &Path, port: u16, config: CompdocConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(path)?;
    tracing::info!("Loaded {} source(s) from {}", catalog.len(), path.display());

    let app = api::create_router(api::AppState::new(catalog, config.site));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("compdoc API listening on http://127.0.0.1:{}/api/v1", port);

    axum::serve(listener, app).await?;
    Ok(())
}
