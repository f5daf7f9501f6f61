//! Service operations
//!
//! Typed request and response shapes for the wrapped APIs. Every request type
//! implements [`Operation`](crate::dispatch::Operation); list requests also
//! implement [`PagedOperation`](crate::pagination::PagedOperation).
//!
//! Request fields are all optional so that callers, and JSON input from the
//! CLI, can build them piecemeal. Required fields are checked in `to_http`.

/// Implements `PagedOperation` for a request with `next_token` and
/// `max_results` fields.
macro_rules! paged_operation {
    ($op:ty, $item:ty, $mode:expr, |$out:ident| $page:expr) => {
        impl $crate::pagination::PagedOperation for $op {
            type Item = $item;
            const DEFAULT_MODE: $crate::pagination::PagingMode = $mode;

            fn next_token(&self) -> Option<&str> {
                self.next_token.as_deref()
            }

            fn set_next_token(&mut self, token: Option<String>) {
                self.next_token = token;
            }

            fn set_page_size(&mut self, size: u32) {
                self.max_results = Some(size);
            }

            fn into_page($out: Self::Output) -> $crate::pagination::Page<Self::Item> {
                $page
            }
        }
    };
}

pub mod clouddirectory;
pub mod notifications;

/// Output of operations that return no fields
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmptyOutput {}
