use clap::{ArgAction, Parser, Subcommand};
use cinelog_config::StoreBackend;
use commands::{config, identity, movie, review, search};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinelog")]
#[command(about = "Cinelog - Search movies and share anonymous reviews")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie catalog by title
    Search {
        /// Movie title to look for
        query: String,
    },
    /// Show a movie with its rating and reviews
    Movie {
        /// Catalog movie id (from 'cinelog search')
        id: u64,
    },
    /// Write a review for a movie
    #[command(long_about = "Write a review for a movie. Missing fields are prompted for when running in a terminal. Reviews are attributed to an anonymous visitor identity stored on this machine.")]
    Review {
        /// Catalog movie id (from 'cinelog search')
        id: u64,

        /// Rating from 1 to 5 stars
        #[arg(long)]
        rating: Option<u8>,

        /// Review text
        #[arg(long)]
        text: Option<String>,

        /// Display name shown next to the review
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the anonymous visitor identity of this machine
    Identity,
    /// Configure credentials and settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the TMDB API key
    Tmdb {
        /// TMDB API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Configure where reviews are stored
    #[command(long_about = "Choose the review store. 'local' keeps reviews in a JSON file in the data directory; 'supabase' uses a hosted reviews table.")]
    Store {
        /// Store backend: local or supabase
        #[arg(long, value_parser = parse_backend)]
        backend: Option<StoreBackend>,

        /// Supabase project URL
        #[arg(long)]
        url: Option<String>,

        /// Supabase anon key (if not provided, will prompt)
        #[arg(long)]
        anon_key: Option<String>,

        /// Reject a second review of a movie from the same visitor
        #[arg(long)]
        enforce_unique: Option<bool>,
    },
}

fn parse_backend(s: &str) -> Result<StoreBackend, String> {
    match s.to_lowercase().as_str() {
        "local" => Ok(StoreBackend::Local),
        "supabase" => Ok(StoreBackend::Supabase),
        _ => Err(format!("Invalid store backend: {}. Use 'local' or 'supabase'", s)),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Movie { id } => movie::run_movie(id, &output).await,
        Commands::Review { id, rating, text, name } => {
            review::run_review(id, rating, text, name, &output).await
        }
        Commands::Identity => identity::run_identity(&output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
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
    fn test_parse_review_flags() {
        let cli = Cli::try_parse_from([
            "cinelog", "review", "42", "--rating", "4", "--text", "Great film", "--name", "Ada",
        ])
        .unwrap();
        match cli.command {
            Commands::Review { id, rating, text, name } => {
                assert_eq!(id, 42);
                assert_eq!(rating, Some(4));
                assert_eq!(text.as_deref(), Some("Great film"));
                assert_eq!(name.as_deref(), Some("Ada"));
            }
            _ => panic!("expected review command"),
        }
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend("Supabase"), Ok(StoreBackend::Supabase));
        assert_eq!(parse_backend("local"), Ok(StoreBackend::Local));
        assert!(parse_backend("sqlite").is_err());
    }
}
