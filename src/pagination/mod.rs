//! Pagination module
//!
//! Walks list operations that return a page of items plus an opaque
//! continuation token.
//!
//! # Overview
//!
//! A [`Cursor`] holds the current token and whether the caller is paging by
//! hand. In auto mode the [`Paginator`] keeps fetching until the service stops
//! returning a token; in manual mode it fetches one page and surfaces the token
//! so the caller can resume later. Tokens are never parsed or altered, only
//! checked for presence.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{Cursor, Listed, Page, PageOptions, PagedOperation, PagingMode};

#[cfg(test)]
mod tests;
