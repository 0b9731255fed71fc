//! phosphor CLI - component catalog and documentation site tooling.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "phosphor")]
#[command(about = "Terminal-themed component catalog and documentation builder")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to phosphor.toml config file
    #[arg(short, long, default_value = "phosphor.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries
    List,

    /// Show one entry and its install plan
    Show {
        /// Entry name (case-sensitive)
        name: String,
    },

    /// Build static documentation site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,

        /// Fail on pages naming a missing component
        #[arg(long)]
        strict: bool,
    },

    /// Preview built documentation
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },

    /// Initialize documentation in current project
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so list/show output stays pipeable.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => {
            let config = Config::load(&cli.config)?;
            commands::list::run(&config).await?;
        }
        Commands::Show { name } => {
            let config = Config::load(&cli.config)?;
            commands::show::run(&config, &name).await?;
        }
        Commands::Build {
            output,
            no_minify,
            strict,
        } => {
            let config = Config::load(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&config, output, minify, strict).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_flags() {
        let cli = Cli::try_parse_from(["phosphor", "build", "--no-minify", "--strict", "-o", "out"])
            .unwrap();

        assert_eq!(cli.config, PathBuf::from("phosphor.toml"));
        match cli.command {
            Commands::Build {
                output,
                no_minify,
                strict,
            } => {
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(no_minify);
                assert!(strict);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["phosphor", "show", "kbd", "--config", "x.toml", "-v"])
            .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(matches!(cli.command, Commands::Show { ref name } if name == "kbd"));
    }
}
