//! CLI commands and argument parsing

use crate::types::Service;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Typed client for Amazon Cloud Directory and AWS User Notifications
#[derive(Parser, Debug)]
#[command(name = "aws-opkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Endpoint URL for the invoked service, overriding config and environment
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available operations
    List {
        /// Only operations of this service
        #[arg(long)]
        service: Option<Service>,
    },

    /// Invoke an operation
    Invoke {
        /// Service: clouddirectory or notifications
        service: Service,

        /// Operation name, e.g. ListDirectories
        operation: String,

        /// Inline input JSON
        #[arg(long, conflicts_with = "input_file")]
        input: Option<String>,

        /// Read input JSON from a file
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Resume from a token returned by an earlier call (fetches one page)
        #[arg(long)]
        starting_token: Option<String>,

        /// Page-size hint sent with each request
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop fetching pages once this many items were printed
        #[arg(long)]
        max_items: Option<usize>,

        /// Fetch every page; not allowed with --starting-token
        #[arg(long, conflicts_with_all = ["no_paginate", "starting_token"])]
        paginate: bool,

        /// Fetch a single page and print the resume token
        #[arg(long)]
        no_paginate: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_invoke() {
        let cli = Cli::try_parse_from([
            "aws-opkit",
            "invoke",
            "clouddirectory",
            "ListDirectories",
            "--input",
            r#"{"state":"ENABLED"}"#,
            "--max-items",
            "10",
            "--no-paginate",
            "--endpoint",
            "http://localhost:4566",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:4566"));
        match cli.command {
            Commands::Invoke {
                service,
                operation,
                input,
                max_items,
                paginate,
                no_paginate,
                ..
            } => {
                assert_eq!(service, Service::CloudDirectory);
                assert_eq!(operation, "ListDirectories");
                assert_eq!(input.as_deref(), Some(r#"{"state":"ENABLED"}"#));
                assert_eq!(max_items, Some(10));
                assert!(!paginate);
                assert!(no_paginate);
            }
            Commands::List { .. } => panic!("Expected invoke"),
        }
    }

    #[test]
    fn test_parse_list_with_alias() {
        let cli =
            Cli::try_parse_from(["aws-opkit", "list", "--service", "uno", "-f", "pretty"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(
            cli.command,
            Commands::List {
                service: Some(Service::Notifications)
            }
        ));
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from([
            "aws-opkit",
            "invoke",
            "notifications",
            "ListChannels",
            "--paginate",
            "--no-paginate",
        ])
        .is_err());

        assert!(Cli::try_parse_from(["aws-opkit", "invoke", "s3", "ListBuckets"]).is_err());
    }

    #[test]
    fn test_paginate_rejected_with_starting_token() {
        let err = Cli::try_parse_from([
            "aws-opkit",
            "invoke",
            "clouddirectory",
            "ListDirectories",
            "--paginate",
            "--starting-token",
            "tok",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from([
            "aws-opkit",
            "invoke",
            "clouddirectory",
            "ListDirectories",
            "--no-paginate",
            "--starting-token",
            "tok",
        ])
        .is_ok());
    }
}
