//! GitHub and blog feed API client.
use crate::types::{ApiError, BlogFeed, FeedSource, Repository, ResultExt};
use anyhow::Context;
use futures::TryFutureExt;
use log::{error, info};
use reqwest::{header, Response, StatusCode};
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};


/// GitHub Api client.
pub struct ApiClient {
    client: Arc<reqwest::Client>,
    api_end_point: String,
}

/// Result using anyhow.
type Result<T> = std::result::Result<T, anyhow::Error>;

impl ApiClient {
    pub const API_END_POINT: &str = "https://api.github.com";

    /// Create a new API client against the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_end_point(Self::API_END_POINT)
    }

    /// Create a new API client against another GitHub compatible end point.
    pub fn with_end_point(end_point: impl Into<String>) -> Result<Self> {
        let end_point: String = end_point.into();
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        Ok(Self {
            client: Arc::new(
                reqwest::Client::builder()
                    // GitHub rejects requests without a user agent.
                    .user_agent(concat!(
                        env!("CARGO_PKG_NAME"),
                        "/",
                        env!("CARGO_PKG_VERSION")
                    ))
                    .default_headers(headers)
                    .build()?,
            ),
            api_end_point: end_point.trim_end_matches('/').to_string(),
        })
    }

    /// Get the `limit` most recently created repositories for `user`.
    pub async fn latest_repos(&self, user: &str, limit: usize) -> Result<Vec<Repository>> {
        let response = self
            .client
            .get(format!("{}/users/{user}/repos", self.api_end_point))
            .query(&[("sort", "created"), ("direction", "desc")])
            .query(&[("per_page", limit)])
            .send()
            .await?;

        check_status(response)?
            .json::<Vec<Repository>>()
            .map_err(anyhow::Error::new)
            .await
    }

    /// Get the language names of a single repository.
    pub async fn languages(&self, languages_url: &str) -> Result<Vec<String>> {
        fetch_languages(self.client.clone(), languages_url.to_string()).await
    }

    /// Pair each repository with its language names.
    ///
    /// All lookups are started before any is awaited. A failed lookup is
    /// logged and yields an empty set, the order of `repos` is preserved.
    pub async fn repos_with_languages(
        &self,
        repos: Vec<Repository>,
    ) -> Vec<(Repository, Vec<String>)> {
        let mut handles = Vec::with_capacity(repos.len());
        for repo in &repos {
            handles.push(tokio::spawn(fetch_languages(
                self.client.clone(),
                repo.languages_url.clone(),
            )));
        }

        let mut result = Vec::with_capacity(repos.len());

        for (repo, h) in repos.into_iter().zip(handles) {
            let languages = match h.await {
                Ok(languages) => languages
                    .with_context(|| format!("Failed to get languages for {}", repo.name))
                    .log_error()
                    .unwrap_or_default(),
                Err(err) => {
                    error!("Language lookup for {} did not complete: {err}", repo.name);
                    Vec::new()
                }
            };
            result.push((repo, languages));
        }

        result
    }

    /// Load the blog feed document.
    pub async fn blog_feed(&self, source: &FeedSource) -> Result<BlogFeed> {
        match source {
            FeedSource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .query(&[("cache-bust", cache_bust())])
                    .send()
                    .await?;

                check_status(response)?
                    .json::<BlogFeed>()
                    .map_err(anyhow::Error::new)
                    .await
            }
            FeedSource::File(path) => {
                let content = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read blog feed {path:?}"))?;
                info!("Read blog feed from {path:?}");
                serde_json::from_slice(&content).context("Blog feed is not valid")
            }
        }
    }

    /// Check whether a resource can be fetched.
    pub async fn resource_available(&self, url: &str) -> bool {
        is_available(self.client.clone(), url.to_string()).await
    }

    /// Check multiple resources concurrently, results are in the order of
    /// `urls`.
    pub async fn resources_available(&self, urls: Vec<String>) -> Vec<bool> {
        let handles = urls
            .into_iter()
            .map(|url| tokio::spawn(is_available(self.client.clone(), url)))
            .collect::<Vec<_>>();

        let mut result = Vec::with_capacity(handles.len());
        for h in handles {
            result.push(h.await.unwrap_or(false));
        }
        result
    }
}

async fn fetch_languages(client: Arc<reqwest::Client>, url: String) -> Result<Vec<String>> {
    let response = client.get(&url).send().await?;
    let languages = check_status(response)?
        .json::<serde_json::Map<String, serde_json::Value>>()
        .await?;

    // Values are byte counts, only the names are used.
    Ok(languages.into_iter().map(|(name, _)| name).collect())
}

/// HEAD request, retried as a GET when the server does not allow HEAD.
async fn is_available(client: Arc<reqwest::Client>, url: String) -> bool {
    match client.head(&url).send().await.map(|resp| resp.status()) {
        Ok(StatusCode::METHOD_NOT_ALLOWED) => client
            .get(&url)
            .send()
            .await
            .is_ok_and(|resp| resp.status().is_success()),
        Ok(status) => status.is_success(),
        Err(_) => false,
    }
}

fn check_status(response: Response) -> std::result::Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            url: response.url().to_string(),
            status,
        })
    }
}

fn cache_bust() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
