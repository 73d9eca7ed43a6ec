//! CLI module for Asha.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Asha - keyword-routed semantic retrieval
///
/// Finds job postings, professional-development sessions and mentorship
/// programs relevant to a free-text query.
#[derive(Parser, Debug)]
#[command(name = "asha")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route a query to the best collection and show ranked matches
    Retrieve {
        /// Free-text query
        query: String,

        /// Field filter applied to jobs and mentorship (repeatable, e.g. location=Pune)
        #[arg(short, long, value_parser = parse_filter_pair)]
        filter: Vec<(String, String)>,

        /// Print the raw {source, data} result as JSON
        #[arg(long)]
        json: bool,

        /// Print the result as prompt context text
        #[arg(long, conflicts_with = "json")]
        context: bool,
    },

    /// Rank a single collection against a query
    Search {
        /// Search query
        query: String,

        /// Collection to search (jobs, sessions, mentorship)
        #[arg(short, long)]
        source: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Field filter (repeatable, e.g. industry=Tech)
        #[arg(short, long, value_parser = parse_filter_pair)]
        filter: Vec<(String, String)>,
    },

    /// Start HTTP API server for the chat front end
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check API key and data file availability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

/// Parse a `key=value` filter argument.
pub fn parse_filter_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}': expected key=value", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid filter '{}': empty key", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_pair() {
        assert_eq!(
            parse_filter_pair("location = Pune").unwrap(),
            ("location".to_string(), "Pune".to_string())
        );
        assert_eq!(
            parse_filter_pair("apply_link=https://x.example/?a=b").unwrap().1,
            "https://x.example/?a=b"
        );
        assert!(parse_filter_pair("location").is_err());
        assert!(parse_filter_pair("=Pune").is_err());
    }

    #[test]
    fn test_cli_parses_retrieve() {
        let cli = Cli::try_parse_from([
            "asha", "retrieve", "job in tech", "-f", "location=Pune", "-f", "industry=Tech", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Retrieve { query, filter, json, context } => {
                assert_eq!(query, "job in tech");
                assert_eq!(filter.len(), 2);
                assert!(json);
                assert!(!context);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
