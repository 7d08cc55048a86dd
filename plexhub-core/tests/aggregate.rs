//! Aggregation against live (mock) Plex servers.

use std::sync::Arc;
use std::time::Duration;

use plexhub_core::{filter_since, ServerAggregator};
use plexhub_providers::{Backend, PlexClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/xml")
}

/// A Plex server with one movie section holding `movies` (title, addedAt).
async fn plex_with_movies(movies: &[(&str, u64)]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections"))
        .respond_with(xml(
            r#"<MediaContainer size="1">
                 <Directory key="1" type="movie" title="Movies"><Location id="1" path="/movies"/></Directory>
               </MediaContainer>"#,
        ))
        .mount(&server)
        .await;

    let videos: String = movies
        .iter()
        .map(|(title, added_at)| format!(r#"<Video title="{title}" year="2001" addedAt="{added_at}"/>"#))
        .collect();
    Mock::given(method("GET"))
        .and(path("/library/sections/1/all"))
        .respond_with(xml(&format!("<MediaContainer>{videos}</MediaContainer>")))
        .mount(&server)
        .await;

    server
}

fn aggregator(timeout: Duration) -> ServerAggregator {
    ServerAggregator::with_client(Arc::new(PlexClient::with_timeout(timeout).unwrap()))
}

#[tokio::test]
async fn all_backends_succeed_in_configured_order() {
    let first = plex_with_movies(&[("Heat", 100)]).await;
    let second = plex_with_movies(&[("Alien", 200), ("Aliens", 300)]).await;
    let backends = vec![
        Backend::new("first", first.uri(), "t1"),
        Backend::new("second", second.uri(), "t2"),
    ];

    let outcome = aggregator(Duration::from_secs(5)).aggregate(&backends, "movie").await;

    assert!(!outcome.all_failed);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].server_name, "first");
    assert_eq!(outcome.results[0].movies.len(), 1);
    assert_eq!(outcome.results[1].server_name, "second");
    assert_eq!(outcome.results[1].movies[1].title, "Aliens");
    assert_eq!(outcome.results[1].movies[1].year, Some(2001));
}

#[tokio::test]
async fn one_backend_timing_out_does_not_affect_the_other() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(xml(r#"<MediaContainer size="0"/>"#).set_delay(Duration::from_secs(3)))
        .mount(&slow)
        .await;
    let healthy = plex_with_movies(&[("Heat", 100), ("Ronin", 200)]).await;

    let backends = vec![
        Backend::new("slow", slow.uri(), "t1"),
        Backend::new("healthy", healthy.uri(), "t2"),
    ];

    let outcome = aggregator(Duration::from_millis(300)).aggregate(&backends, "movie").await;

    assert!(!outcome.all_failed);
    assert_eq!(outcome.results.len(), 2);

    let slow_result = &outcome.results[0];
    assert_eq!(slow_result.server_name, "slow");
    assert!(slow_result.movies.is_empty());
    let error = slow_result.error.as_deref().unwrap();
    assert!(error.starts_with("failed to retrieve movies: "), "{error}");

    let healthy_result = &outcome.results[1];
    assert!(healthy_result.error.is_none());
    assert_eq!(healthy_result.movies.len(), 2);
}

#[tokio::test]
async fn every_backend_failing_is_all_failed() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&broken)
        .await;

    let backends = vec![
        Backend::new("broken", broken.uri(), "t1"),
        Backend::new("gone", "http://127.0.0.1:9", "t2"),
    ];

    let outcome = aggregator(Duration::from_secs(2)).aggregate(&backends, "movie").await;

    assert!(outcome.all_failed);
    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.results.iter().all(|r| r.error.is_some() && r.movies.is_empty()));
    assert!(outcome.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("failed to list sections"));
}

#[tokio::test]
async fn no_backends_is_all_failed() {
    let outcome = aggregator(Duration::from_secs(1)).aggregate(&[], "movie").await;
    assert!(outcome.all_failed);
    assert!(outcome.results.is_empty());
}

#[tokio::test]
async fn since_filter_over_aggregated_results() {
    let mixed = plex_with_movies(&[("Old", 500), ("New", 1500)]).await;
    let stale = plex_with_movies(&[("Ancient", 500)]).await;
    let backends = vec![
        Backend::new("mixed", mixed.uri(), "t1"),
        Backend::new("stale", stale.uri(), "t2"),
    ];

    let outcome = aggregator(Duration::from_secs(5)).aggregate(&backends, "movie").await;
    let filtered = filter_since(outcome, 1000);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].server_name, "mixed");
    assert_eq!(filtered[0].movies.len(), 1);
    assert_eq!(filtered[0].movies[0].title, "New");
    assert_eq!(filtered[0].movies[0].added_at, 1500);
}

#[tokio::test]
async fn probe_reports_reachability() {
    let up = plex_with_movies(&[]).await;
    let backends = vec![
        Backend::new("up", up.uri(), "t1"),
        Backend::new("down", "http://127.0.0.1:9", "t2"),
    ];

    let statuses = aggregator(Duration::from_secs(2)).probe(&backends).await;

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].name, "up");
    assert_eq!(statuses[0].url, up.uri());
    assert!(statuses[0].error.is_none());
    assert_eq!(statuses[1].name, "down");
    assert!(statuses[1].error.is_some());
}

#[tokio::test]
async fn show_seasons_resolve_to_episodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections"))
        .respond_with(xml(
            r#"<MediaContainer size="1">
                 <Directory key="2" type="show" title="TV Shows"><Location id="2" path="/tv"/></Directory>
               </MediaContainer>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/library/sections/2/all"))
        .respond_with(xml(
            r#"<MediaContainer>
                 <Directory key="/library/metadata/10/children" type="show" title="Dark"/>
               </MediaContainer>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/library/metadata/10/children"))
        .respond_with(xml(
            r#"<MediaContainer viewGroup="season">
                 <Directory key="/library/metadata/11/children" type="season" title="Season 1"/>
               </MediaContainer>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/library/metadata/11/children"))
        .respond_with(xml(
            r#"<MediaContainer viewGroup="episode">
                 <Video title="Secrets" year="2017" addedAt="100"/>
                 <Video title="Lies" year="2017" addedAt="200"/>
               </MediaContainer>"#,
        ))
        .mount(&server)
        .await;

    let backends = vec![Backend::new("home", server.uri(), "tok")];
    let outcome = aggregator(Duration::from_secs(5)).aggregate(&backends, "show").await;

    assert!(!outcome.all_failed);
    assert_eq!(outcome.results[0].error, None);
    let titles: Vec<&str> = outcome.results[0].movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Secrets", "Lies"]);
}
