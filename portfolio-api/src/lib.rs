//! Portfolio site data sources: GitHub repositories and the blog feed.
mod client;
mod types;

pub use client::ApiClient;
pub use types::*;
