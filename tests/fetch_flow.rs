//! Fetch flow tests
//!
//! Drives a page state through the fetch controller the way an adapter does:
//! build a request, let the data source answer, apply the result.

use clap::Parser;
use pagewise::client::Client;
use pagewise::pager::{
    Applied, Boundary, FetchResult, PageCallbacks, PageState, PagedFetchController, PagerConfig,
    Position,
};
use pagewise::Args;
use rstest::*;
use serde_json::json;
use std::io::Write;

#[fixture]
fn state() -> PageState {
    PageState::new(PagerConfig::default(), PageCallbacks::new()).unwrap()
}

fn document(data: serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{data}").unwrap();
    file
}

fn client(file: &tempfile::NamedTempFile) -> Client {
    Client::new(Args::parse_from([
        "pagewise",
        file.path().to_str().unwrap(),
    ]))
}

#[rstest]
fn full_page_then_short_page(mut state: PageState) {
    let mut controller = PagedFetchController::new();

    // Arrange
    let (ticket, request) = controller.build_request(&mut state);
    assert_eq!((request.page, request.page_length), (1, 10));

    // Act
    let applied = controller.apply_result(&mut state, ticket, FetchResult::collection(10));

    // Assert
    assert_eq!(applied, Applied::Boundary(Boundary::First));
    assert!(state.next_page());
    assert!(state.changed());

    let (ticket, request) = controller.build_request(&mut state);
    assert_eq!(request.page, 2);

    let applied = controller.apply_result(&mut state, ticket, FetchResult::collection(4));
    assert_eq!(applied, Applied::Boundary(Boundary::Last));
    assert_eq!(state.max(), Some(2));
    assert!(!state.controls().next);
    assert!(!state.next_page());
    assert_eq!(state.position(), Position::Last);
}

#[rstest]
#[case(1, Boundary::Only)]
#[case(3, Boundary::Last)]
fn scalar_response(mut state: PageState, #[case] page: i64, #[case] expected: Boundary) {
    let mut controller = PagedFetchController::new();
    state.set_page(Some(page));

    let (ticket, _) = controller.build_request(&mut state);
    let applied = controller.apply_result(&mut state, ticket, FetchResult::classify(&json!(7)));

    assert_eq!(applied, Applied::Boundary(expected));
}

#[rstest]
fn exactly_full_last_page_is_not_recognised(mut state: PageState) {
    let mut controller = PagedFetchController::new();
    state.set_page(Some(2));

    // 20 items in total, page 2 is the last one but looks like any other
    let (ticket, _) = controller.build_request(&mut state);
    controller.apply_result(&mut state, ticket, FetchResult::collection(10));

    assert_eq!(state.position(), Position::Interior);
    assert!(state.controls().next);

    // only the empty page after it reveals the end
    assert!(state.next_page());
    let (ticket, _) = controller.build_request(&mut state);
    controller.apply_result(&mut state, ticket, FetchResult::collection(0));
    assert_eq!(state.max(), Some(3));
}

#[rstest]
#[tokio::test]
async fn pages_through_a_document(mut state: PageState) {
    let file = document(json!((0..25).collect::<Vec<_>>()));
    let client = client(&file);
    let mut controller = PagedFetchController::new();

    let mut pages = Vec::new();
    loop {
        let (ticket, request) = controller.build_request(&mut state);
        let data = client.fetch(request).await.unwrap();
        pages.push(data.clone());

        controller.apply_result(&mut state, ticket, FetchResult::classify(&data));
        if !state.next_page() {
            break;
        }
    }

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2], json!([20, 21, 22, 23, 24]));
    assert_eq!(state.max(), Some(3));
}

#[rstest]
#[tokio::test]
async fn keyed_document_fits_one_page(mut state: PageState) {
    let file = document(json!({"alpha": 1, "beta": 2}));
    let client = client(&file);
    let mut controller = PagedFetchController::new();

    let (ticket, request) = controller.build_request(&mut state);
    let data = client.fetch(request).await.unwrap();
    controller.apply_result(&mut state, ticket, FetchResult::classify(&data));

    assert_eq!(state.position(), Position::Only);
    assert!(!state.controls().page);
}

#[tokio::test]
async fn broken_document_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[1, 2").unwrap();

    let err = client(&file).load_all().await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse data source"));
}
