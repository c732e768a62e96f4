//! Folio CLI - markdown blog renderer.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Markdown blog renderer with front matter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create folio.toml and a sample post
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the rendered HTML body of a post
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Skip syntax highlighting
        #[arg(long)]
        no_highlight: bool,
    },

    /// Print the front matter of a post as JSON
    Meta {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Print the post catalog as JSON
    List {
        /// Posts directory (defaults to config or "posts")
        dir: Option<PathBuf>,
    },

    /// Build static blog site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Serve posts, rendering them on each request
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Render { file, no_highlight } => {
            let config = config::load(&cli.config)?;
            commands::render::run(&config, &file, !no_highlight)?;
        }
        Commands::Meta { file } => {
            commands::meta::run(&file)?;
        }
        Commands::List { dir } => {
            let config = config::load(&cli.config)?;
            commands::list::run(&config, dir)?;
        }
        Commands::Build { output, no_minify } => {
            let config = config::load(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&config, output, minify).await?;
        }
        Commands::Serve { port, no_open } => {
            let config = config::load(&cli.config)?;
            commands::serve::run(&config, port, !no_open).await?;
        }
    }

    Ok(())
}
