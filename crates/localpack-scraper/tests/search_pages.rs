//! Integration tests for `ResultPageClient::search_all`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made. Pages are handwritten local-pack fragments;
//! the mocks pin down exactly which offsets the driver requests.

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use localpack_scraper::{ResultPageClient, ScrapeError, SearchOptions};

const TEST_UA: &str = "localpack-test/0.1";

fn test_client(server: &MockServer) -> ResultPageClient {
    ResultPageClient::new(&server.uri(), 5, TEST_UA).expect("failed to build ResultPageClient")
}

/// One listing card with the given title and phone segment.
fn card(title: &str, phone: &str) -> String {
    format!(
        r#"<div class="VkpGBb">
          <div role="heading">{title}</div>
          <div class="rllt__details">
            <div><span class="yi40Hd">4.5</span> <span aria-label="12 reviews">(12)</span> · Shop</div>
            <div>7 High St, Springfield · {phone}</div>
          </div>
          <a href="/url?q=https://shop.example/">Website</a>
        </div>"#
    )
}

fn results_page(cards: &str) -> String {
    format!(r#"<html><body><div id="search">{cards}</div></body></html>"#)
}

/// Container present, zero cards: the driver's terminal page.
fn empty_page() -> String {
    results_page("<p>end of results</p>")
}

fn mock_page(start: &str, body: String) -> Mock {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "gym in tokyo"))
        .and(query_param("start", start))
        .and(query_param("udm", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
}

// ---------------------------------------------------------------------------
// Pagination termination and accumulation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_pages_then_empty_page_accumulates_in_fetch_order() {
    let server = MockServer::start().await;

    mock_page("0", results_page(&card("Alpha Gym", "(555) 123-4567")))
        .mount(&server)
        .await;
    mock_page("10", results_page(&card("Beta Gym", "(555) 765-4321")))
        .mount(&server)
        .await;
    mock_page("20", empty_page()).mount(&server).await;

    let client = test_client(&server);
    let listings = client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .expect("search should succeed");

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].title, "Alpha Gym");
    assert_eq!(listings[0].phone, "+15551234567");
    assert_eq!(listings[1].title, "Beta Gym");
    // The .expect(1) on each mock verifies exactly 3 fetches on drop.
}

#[tokio::test]
async fn identical_listings_on_different_pages_collapse_to_one() {
    let server = MockServer::start().await;

    let same = card("Dupe Gym", "(555) 123-4567");
    mock_page("0", results_page(&same)).mount(&server).await;
    mock_page("10", results_page(&same)).mount(&server).await;
    mock_page("20", empty_page()).mount(&server).await;

    let client = test_client(&server);
    let listings = client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Dupe Gym");
}

#[tokio::test]
async fn missing_container_on_first_page_is_zero_results_not_an_error() {
    let server = MockServer::start().await;

    mock_page("0", "<html><body><p>no matches</p></body></html>".to_owned())
        .mount(&server)
        .await;

    let client = test_client(&server);
    let listings = client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .expect("a resultless page ends the search successfully");

    assert!(listings.is_empty());
}

#[tokio::test]
async fn offset_advances_by_page_size_even_when_a_page_yields_one_record() {
    let server = MockServer::start().await;

    // One record on the first page; the next request must still be start=10.
    mock_page("0", results_page(&card("Lone Gym", "(555) 123-4567")))
        .mount(&server)
        .await;
    mock_page("10", empty_page()).mount(&server).await;

    let client = test_client(&server);
    let listings = client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
}

// ---------------------------------------------------------------------------
// Fetch failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_status_aborts_the_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn requests_carry_browser_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", TEST_UA))
        // wiremock's `header` matcher splits received values on commas, so a
        // comma-joined list must be matched with `headers`.
        .and(headers(
            "accept-language",
            vec!["en-GB", "en-US;q=0.9", "en;q=0.8"],
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .search_all("gym in tokyo", &SearchOptions::default())
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Safety cap and cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_cap_stops_an_upstream_that_never_runs_dry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&card("Endless Gym", "(555) 123-4567"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = SearchOptions {
        max_pages: 2,
        ..SearchOptions::default()
    };
    let err = client
        .search_all("gym in tokyo", &options)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::PaginationLimit { max_pages: 2, .. }));
}

#[tokio::test]
async fn cancelled_token_stops_before_the_first_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = test_client(&server);
    let err = client
        .search_all_with_cancel("gym in tokyo", &SearchOptions::default(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Cancelled {
            pages_fetched: 0,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_phoneless_page_does_not_end_the_search() {
    let server = MockServer::start().await;

    // Page one yields a card, just not one that survives the phone filter.
    // The driver must still request the next offset.
    let phoneless = r#"<div class="VkpGBb"><div role="heading">Unlisted</div></div>"#;
    mock_page("0", results_page(phoneless)).mount(&server).await;
    mock_page("10", results_page(&card("Listed Gym", "(555) 123-4567")))
        .mount(&server)
        .await;
    mock_page("20", empty_page()).mount(&server).await;

    let client = test_client(&server);
    let options = SearchOptions {
        require_phone: true,
        ..SearchOptions::default()
    };
    let listings = client.search_all("gym in tokyo", &options).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Listed Gym");
}

#[tokio::test]
async fn require_phone_drops_phoneless_cards_but_keeps_paginating() {
    let server = MockServer::start().await;

    let phoneless = r#"<div class="VkpGBb"><div role="heading">Unlisted</div></div>"#;
    let cards = format!("{}{phoneless}", card("Listed Gym", "(555) 123-4567"));
    mock_page("0", results_page(&cards)).mount(&server).await;
    mock_page("10", empty_page()).mount(&server).await;

    let client = test_client(&server);
    let options = SearchOptions {
        require_phone: true,
        ..SearchOptions::default()
    };
    let listings = client.search_all("gym in tokyo", &options).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Listed Gym");
}
