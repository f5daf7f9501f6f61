//! Tests for pagination module

use super::*;
use crate::dispatch::mock::{MockTransport, RequestLog};
use crate::dispatch::{Dispatcher, Operation};
use crate::error::{Error, Result};
use crate::http::HttpRequest;
use crate::types::Service;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Test operation
// ============================================================================

#[derive(Debug, Clone, Default)]
struct ListLetters {
    next_token: Option<String>,
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListLettersOutput {
    letters: Vec<String>,
    #[serde(rename = "nextToken")]
    next_token: Option<String>,
}

impl Operation for ListLetters {
    type Output = ListLettersOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListLetters";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(HttpRequest::get("/letters")
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

impl PagedOperation for ListLetters {
    type Item = String;
    const DEFAULT_MODE: PagingMode = PagingMode::Auto;

    fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    fn set_next_token(&mut self, token: Option<String>) {
        self.next_token = token;
    }

    fn set_page_size(&mut self, size: u32) {
        self.max_results = Some(size);
    }

    fn into_page(output: Self::Output) -> Page<Self::Item> {
        Page::new(output.letters, output.next_token)
    }
}

/// Same shape, but pages by hand unless told otherwise
#[derive(Debug, Clone, Default)]
struct ListLettersManually(ListLetters);

impl Operation for ListLettersManually {
    type Output = ListLettersOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListLettersManually";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http()
    }
}

impl PagedOperation for ListLettersManually {
    type Item = String;
    const DEFAULT_MODE: PagingMode = PagingMode::Manual;

    fn next_token(&self) -> Option<&str> {
        self.0.next_token()
    }

    fn set_next_token(&mut self, token: Option<String>) {
        self.0.set_next_token(token);
    }

    fn set_page_size(&mut self, size: u32) {
        self.0.set_page_size(size);
    }

    fn into_page(output: Self::Output) -> Page<Self::Item> {
        ListLetters::into_page(output)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn page(letters: &[&str], token: Option<&str>) -> serde_json::Value {
    json!({ "letters": letters, "nextToken": token })
}

/// Transport scripted with the example scenario: [a, b] then X, then [c]
fn scenario() -> MockTransport {
    MockTransport::new()
        .respond(page(&["a", "b"], Some("X")))
        .respond(page(&["c"], None))
}

fn paginator(transport: MockTransport) -> (Paginator<ListLetters>, RequestLog) {
    let log = transport.request_log();
    let dispatcher = Dispatcher::new(transport);
    (Paginator::new(dispatcher, ListLetters::default()), log)
}

fn sent_tokens(log: &RequestLog) -> Vec<Option<String>> {
    log.lock()
        .unwrap()
        .iter()
        .map(|r| r.query_value("nextToken").map(String::from))
        .collect()
}

async fn collect_items<O: PagedOperation<Item = String>>(
    paginator: Paginator<O>,
) -> Vec<Result<Listed<String>>> {
    paginator.items().collect().await
}

fn item(s: &str) -> Listed<String> {
    Listed::Item(s.to_string())
}

fn ok_values(results: Vec<Result<Listed<String>>>) -> Vec<Listed<String>> {
    results.into_iter().map(|r| r.unwrap()).collect()
}

// ============================================================================
// Cursor / Page
// ============================================================================

#[test]
fn test_cursor_start() {
    let auto = Cursor::start(None, PagingMode::Auto);
    assert!(!auto.is_manual());
    assert!(auto.is_exhausted());

    let manual = Cursor::start(None, PagingMode::Manual);
    assert!(manual.is_manual());

    let supplied = Cursor::start(Some("t0".to_string()), PagingMode::Auto);
    assert!(supplied.is_manual());
    assert_eq!(supplied.token(), Some("t0"));

    let empty = Cursor::start(Some(String::new()), PagingMode::Auto);
    assert!(!empty.is_manual());
    assert!(empty.is_exhausted());
}

#[test]
fn test_cursor_advance() {
    let mut cursor = Cursor::start(None, PagingMode::Auto);
    cursor.advance(Some("next".to_string()));
    assert_eq!(cursor.token(), Some("next"));
    assert!(!cursor.is_manual());

    cursor.advance(Some(String::new()));
    assert!(cursor.is_exhausted());
}

#[test]
fn test_page_normalizes_empty_token() {
    let page: Page<u8> = Page::new(vec![1], Some(String::new()));
    assert!(!page.has_more());
    let page: Page<u8> = Page::new(vec![], Some("t".to_string()));
    assert!(page.has_more());
}

#[test]
fn test_listed_helpers() {
    assert_eq!(item("a").into_item(), Some("a".to_string()));
    let token: Listed<String> = Listed::NextToken("t".to_string());
    assert!(token.is_token());
    assert_eq!(token.into_item(), None);
}

#[test]
fn test_effective_mode() {
    let dispatcher = Dispatcher::new(MockTransport::new());

    let p = Paginator::new(dispatcher.clone(), ListLetters::default());
    assert_eq!(p.effective_mode(), PagingMode::Auto);

    let p = Paginator::new(dispatcher.clone(), ListLetters::default())
        .with_options(PageOptions::new().starting_token("t"));
    assert_eq!(p.effective_mode(), PagingMode::Manual);

    let p = Paginator::new(dispatcher.clone(), ListLettersManually::default());
    assert_eq!(p.effective_mode(), PagingMode::Manual);

    let p = Paginator::new(dispatcher, ListLettersManually::default())
        .with_options(PageOptions::new().mode(PagingMode::Auto));
    assert_eq!(p.effective_mode(), PagingMode::Auto);
}

// ============================================================================
// Auto mode
// ============================================================================

#[tokio::test]
async fn test_auto_mode_scenario() {
    let (paginator, log) = paginator(scenario());

    let results = ok_values(collect_items(paginator).await);

    assert_eq!(results, vec![item("a"), item("b"), item("c")]);
    assert_eq!(sent_tokens(&log), vec![None, Some("X".to_string())]);
}

#[tokio::test]
async fn test_auto_mode_concatenates_pages_in_order() {
    let transport = MockTransport::new()
        .respond(page(&["1", "2"], Some("t1")))
        .respond(page(&[], Some("t2")))
        .respond(page(&["3"], Some("t3")))
        .respond(page(&["4", "5"], Some("")));
    let (paginator, log) = paginator(transport);

    let results = ok_values(collect_items(paginator).await);

    assert_eq!(
        results,
        vec![item("1"), item("2"), item("3"), item("4"), item("5")]
    );
    assert_eq!(
        sent_tokens(&log),
        vec![
            None,
            Some("t1".to_string()),
            Some("t2".to_string()),
            Some("t3".to_string())
        ]
    );
}

#[tokio::test]
async fn test_pages_stream_emits_each_page() {
    let (paginator, _) = paginator(scenario());

    let pages: Vec<Page<String>> = paginator
        .pages()
        .map(|p| p.unwrap())
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].next_token.as_deref(), Some("X"));
    assert_eq!(pages[1].items, vec!["c".to_string()]);
    assert!(!pages[1].has_more());
}

#[tokio::test]
async fn test_single_page_terminates_in_both_modes() {
    for mode in [PagingMode::Auto, PagingMode::Manual] {
        let transport = MockTransport::new()
            .respond(page(&["only"], Some("")))
            .respond(page(&["never"], None));
        let (paginator, log) = paginator(transport);

        let results =
            ok_values(collect_items(paginator.with_options(PageOptions::new().mode(mode))).await);

        assert_eq!(results, vec![item("only")]);
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_collect_all() {
    let (paginator, _) = paginator(scenario());
    let items = paginator.collect_all().await.unwrap();
    assert_eq!(items, vec!["a", "b", "c"]);
}

// ============================================================================
// Manual mode
// ============================================================================

#[tokio::test]
async fn test_manual_mode_scenario() {
    let (paginator, log) = paginator(scenario());

    let results = ok_values(
        collect_items(paginator.with_options(PageOptions::new().mode(PagingMode::Manual))).await,
    );

    assert_eq!(
        results,
        vec![item("a"), item("b"), Listed::NextToken("X".to_string())]
    );
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_operation_default_manual_mode() {
    let transport = scenario();
    let log = transport.request_log();
    let paginator = Paginator::new(Dispatcher::new(transport), ListLettersManually::default());

    let results = ok_values(collect_items(paginator).await);

    assert_eq!(results.last(), Some(&Listed::NextToken("X".to_string())));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_supplied_token_sent_verbatim_and_forces_manual() {
    let token = "AAEAAU+/9Hx=//==opaque%20token";
    let transport = MockTransport::new()
        .respond(page(&["p"], Some("next")))
        .respond(page(&["q"], None));
    let (paginator, log) = paginator(transport);

    let results = ok_values(
        collect_items(
            paginator.with_options(
                PageOptions::new()
                    .mode(PagingMode::Auto)
                    .starting_token(token),
            ),
        )
        .await,
    );

    assert_eq!(sent_tokens(&log), vec![Some(token.to_string())]);
    assert_eq!(
        results,
        vec![item("p"), Listed::NextToken("next".to_string())]
    );
}

#[tokio::test]
async fn test_token_on_request_counts_as_supplied() {
    let transport = MockTransport::new().respond(page(&["z"], None));
    let log = transport.request_log();
    let request = ListLetters {
        next_token: Some("from-request".to_string()),
        max_results: None,
    };

    let paginator = Paginator::new(Dispatcher::new(transport), request);
    let results = ok_values(collect_items(paginator).await);

    assert_eq!(sent_tokens(&log), vec![Some("from-request".to_string())]);
    assert_eq!(results, vec![item("z")]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failure_on_later_page_stops_loop() {
    let transport = MockTransport::new()
        .respond(page(&["a", "b"], Some("t1")))
        .respond(page(&["c"], Some("t2")))
        .fail(Error::http_status(500, r#"{"__type":"InternalServerException"}"#))
        .respond(page(&["never"], None));
    let (paginator, log) = paginator(transport);

    let results = collect_items(paginator).await;

    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(Result::is_ok));
    assert!(matches!(
        results[3],
        Err(Error::RemoteService { ref code, .. }) if code == "InternalServerException"
    ));
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failure_on_first_page() {
    let transport = MockTransport::new().fail(Error::Timeout { timeout_ms: 10 });
    let (paginator, log) = paginator(transport);

    let results =
        collect_items(paginator.with_options(PageOptions::new().mode(PagingMode::Manual))).await;

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::Timeout { .. })));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_collect_all_propagates_error() {
    let transport = MockTransport::new()
        .respond(page(&["a"], Some("t1")))
        .fail(Error::Timeout { timeout_ms: 10 });
    let (paginator, _) = paginator(transport);

    assert!(matches!(
        paginator.collect_all().await,
        Err(Error::Timeout { .. })
    ));
}

// ============================================================================
// Caps, hints and cancellation
// ============================================================================

#[tokio::test]
async fn test_max_items_stops_on_whole_pages() {
    let transport = MockTransport::new()
        .respond(page(&["1", "2"], Some("t1")))
        .respond(page(&["3", "4"], Some("t2")))
        .respond(page(&["5"], None));
    let (paginator, log) = paginator(transport);

    let results =
        ok_values(collect_items(paginator.with_options(PageOptions::new().max_items(3))).await);

    assert_eq!(
        results,
        vec![
            item("1"),
            item("2"),
            item("3"),
            item("4"),
            Listed::NextToken("t2".to_string())
        ]
    );
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_zero_max_items_fetches_nothing() {
    let (paginator, log) = paginator(scenario());

    let results =
        collect_items(paginator.with_options(PageOptions::new().max_items(0))).await;

    assert!(results.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_max_items_hands_back_starting_token() {
    let (paginator, log) = paginator(scenario());
    let options = PageOptions::new().max_items(0).starting_token("resume-here");

    let results = ok_values(collect_items(paginator.with_options(options)).await);

    assert_eq!(results, vec![Listed::NextToken("resume-here".to_string())]);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_page_size_hint_is_sent() {
    let transport = MockTransport::new()
        .respond(page(&["1"], Some("t1")))
        .respond(page(&["2", "3", "4"], None));
    let (paginator, log) = paginator(transport);

    let results =
        ok_values(collect_items(paginator.with_options(PageOptions::new().page_size(1))).await);

    assert_eq!(results.len(), 4);
    let requests = log.lock().unwrap();
    assert!(requests
        .iter()
        .all(|r| r.query_value("maxResults") == Some("1")));
}

#[tokio::test]
async fn test_cancelled_before_first_fetch() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let (paginator, log) = paginator(scenario());

    let results =
        collect_items(paginator.with_options(PageOptions::new().cancellation(cancel))).await;

    assert!(results.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_between_pages() {
    let cancel = CancellationToken::new();
    let (paginator, log) = paginator(scenario());

    let mut pages = Box::pin(
        paginator
            .with_options(PageOptions::new().cancellation(cancel.clone()))
            .items(),
    );

    assert_eq!(pages.next().await.unwrap().unwrap(), item("a"));
    cancel.cancel();
    assert_eq!(pages.next().await.unwrap().unwrap(), item("b"));
    assert_eq!(
        pages.next().await.unwrap().unwrap(),
        Listed::NextToken("X".to_string())
    );
    assert!(pages.next().await.is_none());
    assert_eq!(log.lock().unwrap().len(), 1);
}
