//! Continuation-token pagination loop
//!
//! The loop has two states. While fetching, each step sends the request with
//! the current cursor token, emits the page and advances the cursor. It moves
//! to done after a manual-mode page, when the token runs out, when the item cap
//! is reached, when cancellation is observed, or on the first error. Pages are
//! fetched strictly one after another because each request needs the previous
//! token.

use super::types::{Cursor, Listed, Page, PageOptions, PagedOperation, PagingMode};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use futures::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Drives a [`PagedOperation`] through the dispatcher
#[derive(Debug)]
pub struct Paginator<O: PagedOperation> {
    dispatcher: Dispatcher,
    request: O,
    options: PageOptions,
}

impl<O: PagedOperation> Paginator<O> {
    /// Create a paginator with default options
    pub fn new(dispatcher: Dispatcher, request: O) -> Self {
        Self {
            dispatcher,
            request,
            options: PageOptions::default(),
        }
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    /// The mode the loop will run in
    pub fn effective_mode(&self) -> PagingMode {
        let supplied = self
            .options
            .starting_token
            .as_deref()
            .or_else(|| self.request.next_token());
        let mode = self.options.mode.unwrap_or(O::DEFAULT_MODE);
        if Cursor::start(supplied.map(String::from), mode).is_manual() {
            PagingMode::Manual
        } else {
            PagingMode::Auto
        }
    }

    /// Stream of pages; an error is always the last element
    pub fn pages(self) -> impl Stream<Item = Result<Page<O::Item>>> + Send + 'static {
        stream::unfold(Walker::new(self), |mut walker| async move {
            walker.step().await.map(|page| (page, walker))
        })
    }

    /// Stream of items, followed by the resume token when one is left over
    pub fn items(self) -> impl Stream<Item = Result<Listed<O::Item>>> + Send + 'static {
        stream::unfold(Walker::new(self), |mut walker| async move {
            let batch: Vec<Result<Listed<O::Item>>> = match walker.step().await {
                Some(Ok(page)) => page.items.into_iter().map(|i| Ok(Listed::Item(i))).collect(),
                Some(Err(e)) => vec![Err(e)],
                None => vec![Ok(Listed::NextToken(walker.resume_token()?))],
            };
            Some((stream::iter(batch), walker))
        })
        .flatten()
    }

    /// Gather every item; a leftover token is dropped
    pub async fn collect_all(self) -> Result<Vec<O::Item>> {
        let mut pages = Box::pin(self.pages());
        let mut items = Vec::new();
        while let Some(page) = pages.next().await {
            items.extend(page?.items);
        }
        Ok(items)
    }
}

/// Loop state owned by one stream
struct Walker<O: PagedOperation> {
    dispatcher: Dispatcher,
    request: O,
    cursor: Cursor,
    max_items: Option<usize>,
    cancellation: Option<CancellationToken>,
    pages: usize,
    emitted: usize,
    done: bool,
    failed: bool,
    resumed: bool,
}

impl<O: PagedOperation> Walker<O> {
    fn new(paginator: Paginator<O>) -> Self {
        let Paginator {
            dispatcher,
            mut request,
            options,
        } = paginator;

        let supplied = options
            .starting_token
            .or_else(|| request.next_token().map(String::from));
        let cursor = Cursor::start(supplied, options.mode.unwrap_or(O::DEFAULT_MODE));
        if let Some(size) = options.page_size {
            request.set_page_size(size);
        }

        Self {
            dispatcher,
            request,
            cursor,
            max_items: options.max_items,
            cancellation: options.cancellation,
            pages: 0,
            emitted: 0,
            done: false,
            failed: false,
            resumed: false,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn cap_reached(&self) -> bool {
        self.max_items.is_some_and(|max| self.emitted >= max)
    }

    async fn step(&mut self) -> Option<Result<Page<O::Item>>> {
        if self.done {
            return None;
        }
        if self.is_cancelled() {
            warn!(
                operation = O::NAME,
                pages = self.pages,
                "pagination cancelled before next fetch"
            );
            self.done = true;
            return None;
        }
        if self.cap_reached() {
            debug!(operation = O::NAME, "item cap reached before first fetch");
            self.done = true;
            return None;
        }

        self.request
            .set_next_token(self.cursor.token().map(String::from));

        let output = match self.dispatcher.send(&self.request).await {
            Ok(output) => output,
            Err(e) => {
                self.done = true;
                self.failed = true;
                return Some(Err(e));
            }
        };

        let page = O::into_page(output);
        let page = Page::new(page.items, page.next_token);
        self.pages += 1;
        self.emitted += page.items.len();
        self.cursor.advance(page.next_token.clone());

        debug!(
            operation = O::NAME,
            page = self.pages,
            items = page.items.len(),
            total = self.emitted,
            has_more = page.has_more(),
            "fetched page"
        );

        if self.cursor.is_manual() || self.cursor.is_exhausted() || self.cap_reached() {
            self.done = true;
        }

        Some(Ok(page))
    }

    /// The unfollowed token once the loop has stopped, handed out once
    fn resume_token(&mut self) -> Option<String> {
        if !self.done || self.failed || self.resumed {
            return None;
        }
        self.resumed = true;
        self.cursor.token().map(String::from)
    }
}
