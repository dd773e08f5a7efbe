use log::error;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt::{Debug, Display},
    path::PathBuf,
};

/// A GitHub repository as returned by the user repository listing.
///
/// [`https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user`]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub default_branch: Option<String>,
    pub language: Option<String>,
    pub languages_url: String,
    pub owner: Option<Owner>,
}

impl Repository {
    /// Branch used for raw content links.
    pub fn branch(&self) -> &str {
        self.default_branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or("main")
    }
}

/// Repository owner.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Owner {
    pub login: String,
}

/// Generated blog feed document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BlogFeed {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub posts: Vec<BlogPost>,
}

/// A `null` list is an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single blog post from the feed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlogPost {
    pub title: Option<String>,
    /// Post summary, html.
    pub description: Option<String>,
    pub link: String,
    pub published: Option<String>,
    pub thumbnail: Option<String>,
}

/// Where the blog feed document lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum FeedSource {
    /// Served over http(s), fetched with a cache busting query parameter.
    Url(String),
    /// A file on disk.
    File(PathBuf),
}

impl From<String> for FeedSource {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value)
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for FeedSource {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FeedSource> for String {
    fn from(value: FeedSource) -> Self {
        match value {
            FeedSource::Url(url) => url,
            FeedSource::File(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Non-success responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Extension trait for the Result type.
pub trait ResultExt<T, E> {
    /// If the result is [`Err`] then log the error.
    fn log_error(self) -> Self;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Display,
{
    fn log_error(self) -> Self {
        match self {
            o @ Ok(_) => o,
            Err(err) => {
                error!("{err}");
                Err(err)
            }
        }
    }
}
