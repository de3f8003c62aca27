//! CLI entry point for inkwell

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkwell::commands::render::{parse_category, Target};
use inkwell::config::SiteConfig;
use inkwell::content::HttpSource;
use inkwell::{Inkwell, Page};

#[derive(Parser)]
#[command(name = "inkwell")]
#[command(version)]
#[command(about = "Render The Inkwell's posts into feed fragments", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Read posts from this base URL instead of the local posts directory
    #[arg(short, long, global = true)]
    remote: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site with one directory per category
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Render the merged feed of every category
    Feed,

    /// Render a single category
    Collection {
        /// poetry, sentiment, stories or prompts
        category: String,
    },

    /// Render the full view of a story
    Story { id: String },

    /// Render the full view of a prompt
    Prompt { id: String },

    /// Render the about page
    About,

    /// Render a page by navigation key (everything, about-beau, or a category)
    Page { key: String },

    /// Render the Open Graph and Twitter meta tags
    Meta,

    /// List parsed posts
    List {
        /// Restrict to one category
        category: Option<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the fragment server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },
}

fn open(base_dir: &Path, remote: Option<String>) -> Result<Inkwell> {
    let site = Inkwell::new(base_dir)?;
    let Some(url) = remote else {
        return Ok(site);
    };

    let source = Arc::new(HttpSource::new(&url)?);
    let config = SiteConfig {
        remote_url: Some(url),
        ..(*site.config).clone()
    };
    Ok(Inkwell::with_source(config, base_dir.to_path_buf(), source)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkwell=debug,info"
    } else {
        "inkwell=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            inkwell::commands::init::init_site(&target_dir)?;
            println!("Initialized Inkwell site in {:?}", target_dir);
        }

        Commands::Feed => {
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Page(Page::Everything)).await?;
        }

        Commands::Collection { category } => {
            let category = parse_category(&category)?;
            let site = open(&base_dir, cli.remote)?;
            let target = Target::Page(Page::Collection(category));
            inkwell::commands::render::run(&site, &target).await?;
        }

        Commands::Story { id } => {
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Story(id)).await?;
        }

        Commands::Prompt { id } => {
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Prompt(id)).await?;
        }

        Commands::About => {
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Page(Page::About)).await?;
        }

        Commands::Page { key } => {
            let page: Page = key.parse()?;
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Page(page)).await?;
        }

        Commands::Meta => {
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::render::run(&site, &Target::Meta).await?;
        }

        Commands::List { category, json } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let site = open(&base_dir, cli.remote)?;
            inkwell::commands::list::run(&site, category, json).await?;
        }

        Commands::Serve { port, ip } => {
            let site = open(&base_dir, cli.remote)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkwell::server::start(&site, &ip, port).await?;
        }
    }

    Ok(())
}
