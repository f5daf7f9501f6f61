//! Pagination types and traits
//!
//! Defines the cursor, page and option types shared by every paged operation.

use crate::dispatch::Operation;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// How a list call walks its pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingMode {
    /// Keep fetching until the service stops returning a token
    Auto,
    /// Fetch one page and hand the token back to the caller
    Manual,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in service order
    pub items: Vec<T>,
    /// Token for the following page, absent on the last one
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Build a page, treating an empty token as absent
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: normalize_token(next_token),
        }
    }

    /// Whether another page follows
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

/// An element of an item stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listed<T> {
    /// A result item
    Item(T),
    /// Token to resume from; always the last element when present
    NextToken(String),
}

impl<T> Listed<T> {
    /// The item, if this is one
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::NextToken(_) => None,
        }
    }

    /// Check if this is a resume token
    pub fn is_token(&self) -> bool {
        matches!(self, Self::NextToken(_))
    }
}

/// Continuation state for one pagination loop
///
/// `manual` is fixed when the cursor is created; only the token advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    token: Option<String>,
    manual: bool,
}

impl Cursor {
    /// Start a cursor. A caller-supplied token always means manual paging.
    pub fn start(token: Option<String>, mode: PagingMode) -> Self {
        let token = normalize_token(token);
        let manual = token.is_some() || mode == PagingMode::Manual;
        Self { token, manual }
    }

    /// Current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the caller is paging by hand
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Move to the token returned with the latest page
    pub fn advance(&mut self, next: Option<String>) {
        self.token = normalize_token(next);
    }

    /// No token left to follow
    pub fn is_exhausted(&self) -> bool {
        self.token.is_none()
    }
}

/// A list operation that can be walked page by page
pub trait PagedOperation: Operation + Clone + 'static {
    /// Item type of one page
    type Item: Send + 'static;

    /// Paging behaviour when the caller does not choose one
    const DEFAULT_MODE: PagingMode;

    /// Token currently set on the request
    fn next_token(&self) -> Option<&str>;

    /// Set the token for the next request
    fn set_next_token(&mut self, token: Option<String>);

    /// Apply a page-size hint
    fn set_page_size(&mut self, size: u32);

    /// Split a response into items and the following token
    fn into_page(output: Self::Output) -> Page<Self::Item>;
}

/// Caller controls for a paginated call
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Override the operation's default mode
    pub mode: Option<PagingMode>,
    /// Token to resume from; forces manual mode
    pub starting_token: Option<String>,
    /// Page-size hint sent to the service
    pub page_size: Option<u32>,
    /// Stop pulling pages once this many items were emitted
    pub max_items: Option<usize>,
    /// Checked between page fetches
    pub cancellation: Option<CancellationToken>,
}

impl PageOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paging mode
    #[must_use]
    pub fn mode(mut self, mode: PagingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Resume from a saved token
    #[must_use]
    pub fn starting_token(mut self, token: impl Into<String>) -> Self {
        self.starting_token = Some(token.into());
        self
    }

    /// Set the page-size hint
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Cap the number of emitted items
    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Observe a cancellation token
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Empty tokens mean "no more pages"
pub(crate) fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}
