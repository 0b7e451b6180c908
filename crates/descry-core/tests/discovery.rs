//! End-to-end discovery tests against a mock HTTP server.
//!
//! Every scenario from the discovery contract is exercised: header-level
//! links, 303 synthesis, body-level links, host-meta (direct and via
//! URI-Template), descriptor caching, aggregation, and the not-found
//! path. Call counts are asserted through wiremock's `expect`.

#![allow(clippy::unwrap_used, clippy::panic)]

use descry_core::{Discoverer, PredicateSet, Term, vocab};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discoverer() -> Discoverer {
    Discoverer::new().unwrap()
}

#[tokio::test]
async fn link_header_match_returns_without_body_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .insert_header("link", "</resource.rdf>; rel=\"describedby\""),
        )
        .expect(1)
        .mount(&server)
        .await;
    // a body fetch would be a GET; none may happen
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resource = format!("{}/resource", server.uri());
    let found = discoverer().discover(&resource).await;
    assert_eq!(found, Some(format!("{}/resource.rdf", server.uri())));
}

#[tokio::test]
async fn see_other_redirect_is_synthesized_in_both_modes() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(303).insert_header("location", "/resource.about"))
        .mount(&server)
        .await;
    // multi mode reaches the host-meta step; nothing lives there
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resource = format!("{}/resource", server.uri());
    let expected = format!("{}/resource.about", server.uri());

    let d = discoverer();
    assert_eq!(d.discover(&resource).await, Some(expected.clone()));
    assert_eq!(d.discover_all(&resource).await, vec![expected]);
}

#[tokio::test]
async fn body_level_link_needs_exactly_one_get() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(
                    r#"<html><head>
                        <link rel="describedby" href="/page.meta">
                    </head><body>hi</body></html>"#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resource = format!("{}/page", server.uri());
    let found = discoverer().discover(&resource).await;
    assert_eq!(found, Some(format!("{}/page.meta", server.uri())));
}

#[tokio::test]
async fn host_meta_link_is_the_last_resort() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/thing"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xrd+xml")
                .set_body_string(
                    r#"<?xml version="1.0"?>
                    <XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
                      <Link rel="lrdd" href="https://meta.example/describe"/>
                    </XRD>"#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resource = format!("{}/thing", server.uri());
    let found = discoverer().discover(&resource).await;
    assert_eq!(found, Some("https://meta.example/describe".to_string()));
}

#[tokio::test]
async fn host_meta_template_is_expanded_with_encoded_resource() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xrd+xml")
                .set_body_string(
                    r#"<XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
                      <Link rel="lrdd" template="https://example.org/describe?uri={uri}"/>
                    </XRD>"#,
                ),
        )
        .mount(&server)
        .await;

    let resource = format!("{}/x", server.uri());
    let found = discoverer().discover(&resource).await.unwrap();

    let encoded = server
        .uri()
        .replace("://", "%3A%2F%2F")
        .replace(':', "%3A");
    assert_eq!(
        found,
        format!("https://example.org/describe?uri={encoded}%2Fx")
    );
}

#[tokio::test]
async fn parse_fetches_each_descriptor_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/descriptor.ttl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                "<http://a.example/x> <http://purl.org/dc/terms/title> \"X\" .".to_string(),
                "text/turtle",
            ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let d = discoverer();
    let url = format!("{}/descriptor.ttl", server.uri());

    let first = d.parse(&url).await.unwrap();
    let second = d.parse(&url).await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_parse_is_not_negatively_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let d = discoverer();
    let url = format!("{}/flaky", server.uri());
    assert!(d.parse(&url).await.is_none());
    // absence means "not yet fetched", so the second call fetches again
    assert!(d.parse(&url).await.is_none());
}

#[tokio::test]
async fn process_all_merges_every_descriptor_graph() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/turtle")
                .insert_header(
                    "link",
                    "</first.ttl>; rel=\"describedby\", </second.ttl>; rel=\"lrdd\"",
                ),
        )
        .mount(&server)
        .await;
    // the resource itself is machine-readable turtle
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                format!(
                    "<{0}/doc> <http://purl.org/dc/terms/title> \"the doc itself\" .",
                    server.uri()
                ),
                "text/turtle",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/first.ttl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                "<http://a.example/x> <http://example.org/source> <http://one.example/> ."
                    .to_string(),
                "text/turtle",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second.ttl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                "<http://a.example/x> <http://example.org/source> <http://two.example/> ."
                    .to_string(),
                "text/turtle",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let d = discoverer();
    let resource = format!("{}/doc", server.uri());

    let merged = d.process_all(&resource).await;

    let own = d.parse(&resource).await.unwrap();
    let first = d.parse(&format!("{}/first.ttl", server.uri())).await.unwrap();
    let second = d
        .parse(&format!("{}/second.ttl", server.uri()))
        .await
        .unwrap();

    assert!(merged.is_superset_of(&own));
    assert!(merged.is_superset_of(&first));
    assert!(merged.is_superset_of(&second));
    assert_eq!(merged.len(), own.len() + first.len() + second.len());
}

#[tokio::test]
async fn nothing_found_anywhere_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let d = discoverer();
    let resource = format!("{}/opaque", server.uri());

    assert_eq!(d.discover(&resource).await, None);
    assert!(d.discover_all(&resource).await.is_empty());
    assert!(d.process(&resource).await.is_none());
    assert!(d.process_all(&resource).await.is_empty());
}

#[tokio::test]
async fn transport_failure_degrades_to_host_meta() {
    // no server listening on the resource's port at all
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let resource = format!("{}/resource", server.uri());
    // a 500 on HEAD still leaves the chain running to its end
    assert_eq!(discoverer().discover(&resource).await, None);
}

#[tokio::test]
async fn self_description_wins_when_nothing_links() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/card"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("content-type", "text/turtle"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/card"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                format!(
                    "<{0}/card> <http://xmlns.com/foaf/0.1/name> \"Ada\" .",
                    server.uri()
                ),
                "text/turtle",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let d = discoverer();
    let resource = format!("{}/card", server.uri());

    assert_eq!(d.discover(&resource).await, Some(resource.clone()));

    // and the aggregate is exactly the self-description
    let merged = d.process_all(&resource).await;
    assert!(merged.has_subject(&resource));
}

#[tokio::test]
async fn custom_predicates_change_what_counts_as_a_match() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/item"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .insert_header("link", "</item.meta>; rel=\"describedby\""),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // a set without describedby must fall through to nothing
    let d = Discoverer::with_predicates(PredicateSet::from_relations(&["copyright"])).unwrap();
    let resource = format!("{}/item", server.uri());
    assert_eq!(d.discover(&resource).await, None);

    // the strict preset still recognizes describedby
    let strict = Discoverer::strict().unwrap();
    assert_eq!(
        strict.discover(&resource).await,
        Some(format!("{}/item.meta", server.uri()))
    );
}

#[tokio::test]
async fn multi_mode_accumulates_across_steps() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .insert_header("link", "</header.meta>; rel=\"describedby\""),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(
                    r#"<html><head><link rel="lrdd" href="/body.meta"></head></html>"#,
                ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.well-known/host-meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xrd+xml")
                .set_body_string(
                    r#"<XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
                      <Link rel="describedby" href="https://hm.example/direct"/>
                      <Link rel="lrdd" template="https://hm.example/t?uri={uri}"/>
                    </XRD>"#,
                ),
        )
        .mount(&server)
        .await;

    let resource = format!("{}/all", server.uri());
    let all = discoverer().discover_all(&resource).await;

    // header + body from the working graph, then host-meta direct, then
    // the expanded template; predicate priority orders the first two.
    // The body carried statements about the resource itself, so the
    // resource closes the list as its own descriptor.
    assert_eq!(all.len(), 5);
    assert_eq!(all[0], format!("{}/header.meta", server.uri()));
    assert_eq!(all[1], format!("{}/body.meta", server.uri()));
    assert_eq!(all[2], "https://hm.example/direct");
    assert!(all[3].starts_with("https://hm.example/t?uri=http%3A%2F%2F"));
    assert_eq!(all[4], resource);
}

#[tokio::test]
async fn non_http_scheme_skips_header_and_body_steps() {
    // no authority, no http scheme: every step is inert
    let d = discoverer();
    assert_eq!(d.discover("urn:isbn:0451450523").await, None);
    assert!(d.discover_all("urn:isbn:0451450523").await.is_empty());
}

#[tokio::test]
async fn descriptor_graphs_parse_into_queryable_triples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/meta.xrd"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xrd+xml")
                .set_body_string(
                    r#"<XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
                      <Subject>http://a.example/x</Subject>
                      <Link rel="describedby" href="http://a.example/deep.meta"/>
                    </XRD>"#,
                ),
        )
        .mount(&server)
        .await;

    let d = discoverer();
    let graph = d
        .parse(&format!("{}/meta.xrd", server.uri()))
        .await
        .unwrap();

    let objects: Vec<&Term> = graph
        .objects(Some("http://a.example/x"), vocab::powder::DESCRIBEDBY)
        .collect();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].as_iri(), Some("http://a.example/deep.meta"));
}
