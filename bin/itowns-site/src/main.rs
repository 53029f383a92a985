//! iTowns Site CLI
//!
//! Content validation and RSS feed generation for the iTowns website.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the iTowns site tooling.
#[derive(Parser)]
#[command(
    name = "itowns-site",
    version,
    about = "Validate iTowns site content and generate its RSS feed"
)]
struct Cli {
    /// Path to configuration file [default: config.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate all content and write the RSS feed
    Build {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Site origin used for feed links (e.g., https://itowns.org)
        #[arg(long)]
        site: Option<String>,
        /// Content directory holding the collections
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Validate configuration and content
    Check {
        /// Content directory holding the collections
        #[arg(long)]
        content: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the RSS feed to stdout
    Feed {
        /// Site origin used for feed links (e.g., https://itowns.org)
        #[arg(long)]
        site: Option<String>,
        /// Content directory holding the collections
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    itowns_site::init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Build {
            output,
            site,
            content,
        } => {
            itowns_site::cmd::build::run(
                config,
                output.as_deref(),
                site.as_deref(),
                content.as_deref(),
            )?;
        }
        Commands::Check { content, strict } => {
            itowns_site::cmd::check::run(config, content.as_deref(), strict)?;
        }
        Commands::Feed { site, content } => {
            itowns_site::cmd::feed::run(config, site.as_deref(), content.as_deref())?;
        }
    }

    Ok(())
}
