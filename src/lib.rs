// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # aws-opkit
//!
//! Typed request/response operations for Amazon Cloud Directory and AWS User
//! Notifications, with a single generic dispatcher and a continuation-token
//! pagination wrapper.
//!
//! ## Features
//!
//! - **Generic dispatch**: one `send` for every operation, with remote errors
//!   and endpoint name-resolution failures classified in one place
//! - **Pagination**: auto mode walks every page, manual mode returns one page
//!   plus the token to resume from, with an item cap and cancellation
//! - **HTTP transport**: retries with backoff and optional client-side rate limiting
//! - **CLI**: invoke any operation by name with JSON input
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aws_opkit::dispatch::Dispatcher;
//! use aws_opkit::http::{HttpClient, HttpClientConfig};
//! use aws_opkit::pagination::Paginator;
//! use aws_opkit::services::clouddirectory::ListDirectories;
//!
//! #[tokio::main]
//! async fn main() -> aws_opkit::Result<()> {
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::builder()
//!             .base_url("https://clouddirectory.us-west-2.amazonaws.com")
//!             .build(),
//!     )?;
//!     let dispatcher = Dispatcher::new(client);
//!
//!     let directories = Paginator::new(dispatcher, ListDirectories::default())
//!         .collect_all()
//!         .await?;
//!     println!("{} directories", directories.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │              CLI  (list, invoke)  →  Engine + catalog         │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────────┬────────────────┐
//! │   Services   │          Pagination          │    Dispatch    │
//! ├──────────────┼──────────────────────────────┼────────────────┤
//! │ CloudDir.    │ Auto / Manual                │ send<O>        │
//! │ Notifications│ Item cap, cancellation       │ Error classify │
//! └──────────────┴──────────────────────────────┴───────┬────────┘
//!                                                       │
//!                                  HTTP transport (retry, backoff, rate limit)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document service request fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Generic operation dispatcher
pub mod dispatch;

/// Continuation-token pagination
pub mod pagination;

/// Typed service operations
pub mod services;

/// Name-based invocation and operation catalog
pub mod engine;

/// Endpoint and HTTP configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, Operation, Transport};
pub use pagination::{Listed, Page, PageOptions, PagedOperation, Paginator, PagingMode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
