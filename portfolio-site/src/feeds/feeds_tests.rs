use super::{
    blog_feed, decorate_images, load_blog_posts, load_latest_repos, repo_feed, POSTS_EMPTY,
    POSTS_FAILED, REPOS_FAILED,
};
use crate::page::{Container, Content};
use httpmock::prelude::*;
use httpmock::Method::HEAD;
use portfolio_api::{ApiClient, FeedSource};
use portfolio_config::SiteConfig;
use serde_json::json;

fn config(server: &MockServer) -> SiteConfig {
    SiteConfig {
        github_user: "someone".to_string(),
        github_api: server.base_url(),
        raw_content: server.url("/raw"),
        blog_feed: FeedSource::from(server.url("/data/medium.json")),
        ..Default::default()
    }
}

fn repo_json(server: &MockServer, name: &str, language: Option<&str>) -> serde_json::Value {
    json!({
        "name": name,
        "description": null,
        "html_url": format!("https://github.com/someone/{name}"),
        "default_branch": "main",
        "language": language,
        "languages_url": server.url(format!("/repos/someone/{name}/languages")),
    })
}

#[tokio::test]
async fn repository_listing_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/someone/repos");
            then.status(500);
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("latest-repos");
    load_latest_repos(&mut container, &client, &config(&server)).await;

    assert_eq!(container.text(), Some(REPOS_FAILED));
    assert!(container.cards().is_empty());
}

#[tokio::test]
async fn failed_languages_fall_back_in_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/someone/repos")
                .query_param("per_page", "6");
            then.status(200).json_body(json!([
                repo_json(&server, "one", Some("Rust")),
                repo_json(&server, "two", Some("Kotlin")),
                repo_json(&server, "three", None),
                repo_json(&server, "four", Some("C")),
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/someone/one/languages");
            then.status(200).json_body(json!({ "Rust": 900, "Shell": 20 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/someone/two/languages");
            then.status(403);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/someone/three/languages");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/someone/four/languages");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("latest-repos");
    load_latest_repos(&mut container, &client, &config(&server)).await;

    let cards = container.cards();
    let titles = cards.iter().map(|c| c.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["one", "two", "three", "four"]);
    assert_eq!(cards[0].tags, ["Rust", "Shell"]);
    assert_eq!(cards[1].tags, ["Kotlin"]);
    assert_eq!(cards[2].tags, ["Other"]);
    assert_eq!(cards[3].tags, ["C"]);
    assert!(cards.iter().all(|c| c.description == "No description provided."));
}

#[tokio::test]
async fn missing_container_makes_no_requests() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/someone/repos");
            then.status(200).json_body(json!([]));
        })
        .await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/data/medium.json");
            then.status(200).json_body(json!({ "posts": [] }));
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let config = config(&server);
    repo_feed(None, &client, &config).await;
    blog_feed(None, &client, &config).await;

    listing.assert_hits_async(0).await;
    feed.assert_hits_async(0).await;
}

#[tokio::test]
async fn unavailable_previews_are_removed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/someone/repos");
            then.status(200).json_body(json!([
                repo_json(&server, "with-image", Some("Rust")),
                repo_json(&server, "without-image", Some("Rust")),
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/languages");
            then.status(200).json_body(json!({ "Rust": 1 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD)
                .path("/raw/someone/with-image/main/SiteImage.png");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD)
                .path("/raw/someone/without-image/main/SiteImage.png");
            then.status(404);
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("latest-repos");
    repo_feed(Some(&mut container), &client, &config(&server)).await;

    let cards = container.cards();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].image.is_some());
    assert!(!cards[0].no_image);
    assert!(cards[1].image.is_none());
    assert!(cards[1].no_image);

    let html = container.render_html();
    assert_eq!(html.matches("work__image-box").count(), 1);
    assert_eq!(html.matches("work__box--no-image").count(), 1);
}

#[tokio::test]
async fn decorating_status_text_is_a_no_op() {
    let client = ApiClient::new().unwrap();
    let mut container = Container::new("blog-list");
    container.set_text(POSTS_EMPTY);

    decorate_images(&mut container, &client).await;

    assert_eq!(container.content(), &Content::Text(POSTS_EMPTY.to_string()));
}

#[tokio::test]
async fn empty_blog_feed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/data/medium.json");
            then.status(200).json_body(json!({ "posts": [] }));
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("blog-list");
    load_blog_posts(&mut container, &client, &config(&server).blog_feed).await;

    assert_eq!(container.text(), Some(POSTS_EMPTY));
    assert!(container.cards().is_empty());
}

#[tokio::test]
async fn blog_feed_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/data/medium.json");
            then.status(404);
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("blog-list");
    load_blog_posts(&mut container, &client, &config(&server).blog_feed).await;

    assert_eq!(container.text(), Some(POSTS_FAILED));
}

#[tokio::test]
async fn blog_posts_in_feed_order() {
    let server = MockServer::start_async().await;
    let long = format!("<p>{}</p>", "word ".repeat(60));
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/data/medium.json")
                .query_param_exists("cache-bust");
            then.status(200).json_body(json!({
                "posts": [
                    {
                        "title": "Newest",
                        "description": long,
                        "link": "https://medium.com/p/2",
                        "published": "2024-05-01 08:00:00",
                        "thumbnail": server.url("/thumbs/2.png")
                    },
                    { "link": "https://medium.com/p/1" }
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/thumbs/2.png");
            then.status(200);
        })
        .await;

    let client = ApiClient::with_end_point(server.base_url()).unwrap();
    let mut container = Container::new("blog-list");
    blog_feed(Some(&mut container), &client, &config(&server)).await;

    let cards = container.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Newest");
    assert_eq!(cards[0].description.chars().count(), 183);
    assert!(cards[0].description.ends_with("..."));
    assert!(cards[0].image.is_some());
    assert_eq!(cards[1].title, "Untitled post");
    assert_eq!(cards[1].tags, ["Medium"]);
    assert!(cards[1].no_image);
}

#[tokio::test]
async fn blog_feed_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medium.json");
    std::fs::write(
        &path,
        r#"{ "posts": [{ "title": "From disk", "link": "https://medium.com/p/3" }] }"#,
    )
    .unwrap();

    let client = ApiClient::new().unwrap();
    let mut container = Container::new("blog-list");
    load_blog_posts(&mut container, &client, &FeedSource::File(path)).await;

    assert_eq!(container.cards().len(), 1);
    assert_eq!(container.cards()[0].title, "From disk");
}

#[tokio::test]
async fn null_posts_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medium.json");
    std::fs::write(&path, r#"{ "posts": null }"#).unwrap();

    let client = ApiClient::new().unwrap();
    let mut container = Container::new("blog-list");
    load_blog_posts(&mut container, &client, &FeedSource::File(path)).await;

    assert_eq!(container.text(), Some(POSTS_EMPTY));
    assert!(container.cards().is_empty());
}
