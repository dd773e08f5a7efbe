//! Load the repository and blog feeds into their containers.
use crate::{
    card::{blog_card, repo_card},
    page::Container,
};
use anyhow::Context as _;
use log::{debug, error, info};
use portfolio_api::{ApiClient, FeedSource};
use portfolio_config::SiteConfig;

pub const REPOS_LOADING: &str = "Loading latest repositories...";
pub const REPOS_FAILED: &str = "Unable to load repositories right now.";
pub const POSTS_LOADING: &str = "Loading blog posts...";
pub const POSTS_FAILED: &str = "Unable to load blog posts right now.";
pub const POSTS_EMPTY: &str = "No blog posts found.";

/// Render the latest repositories, then drop preview images that are not
/// available. Does nothing without a container.
pub async fn repo_feed(container: Option<&mut Container>, client: &ApiClient, config: &SiteConfig) {
    let Some(container) = container else {
        debug!("No #{} container, skipping repositories", config.repos_container);
        return;
    };
    load_latest_repos(container, client, config).await;
    decorate_images(container, client).await;
}

/// Render the blog feed, then drop thumbnails that are not available. Does
/// nothing without a container.
pub async fn blog_feed(container: Option<&mut Container>, client: &ApiClient, config: &SiteConfig) {
    let Some(container) = container else {
        debug!("No #{} container, skipping blog posts", config.blog_container);
        return;
    };
    load_blog_posts(container, client, &config.blog_feed).await;
    decorate_images(container, client).await;
}

/// Fetch the latest repositories with their languages and mount one card per
/// repository in listing order.
pub async fn load_latest_repos(container: &mut Container, client: &ApiClient, config: &SiteConfig) {
    container.set_text(REPOS_LOADING);

    let repos = match client
        .latest_repos(&config.github_user, config.repo_limit)
        .await
        .context("Failed to load repositories")
    {
        Ok(repos) => repos,
        Err(err) => {
            error!("{err:#}");
            container.set_text(REPOS_FAILED);
            return;
        }
    };

    container.clear();
    let repos = client.repos_with_languages(repos).await;

    for (repo, languages) in &repos {
        container.mount(repo_card(
            repo,
            languages,
            &config.raw_content,
            &config.github_user,
        ));
    }
    info!("Rendered {} repositories", repos.len());
}

/// Fetch the blog feed and mount one card per post in feed order.
pub async fn load_blog_posts(container: &mut Container, client: &ApiClient, source: &FeedSource) {
    container.set_text(POSTS_LOADING);

    let feed = match client
        .blog_feed(source)
        .await
        .context("Failed to load blog feed")
    {
        Ok(feed) => feed,
        Err(err) => {
            error!("{err:#}");
            container.set_text(POSTS_FAILED);
            return;
        }
    };

    if feed.posts.is_empty() {
        container.set_text(POSTS_EMPTY);
        return;
    }

    container.clear();
    for post in &feed.posts {
        container.mount(blog_card(post));
    }
    info!("Rendered {} blog posts", feed.posts.len());
}

/// Check every card's preview image and remove the ones that fail to load.
pub async fn decorate_images(container: &mut Container, client: &ApiClient) {
    let (indexes, urls): (Vec<_>, Vec<_>) = container
        .cards()
        .iter()
        .enumerate()
        .filter_map(|(n, card)| card.image.as_ref().map(|image| (n, image.src.clone())))
        .unzip();

    if urls.is_empty() {
        return;
    }

    let available = client.resources_available(urls).await;
    let cards = container.cards_mut();
    for (n, ok) in indexes.into_iter().zip(available) {
        if !ok {
            cards[n].remove_image();
        }
    }
}

#[cfg(test)]
mod feeds_tests;
