//! Render the portfolio site's repository and blog containers.
use anyhow::Context as _;
use log::{debug, error, info};
use portfolio_api::ApiClient;
use portfolio_config::{
    config_path, init_logger, load_config_from, load_or_init_config, SiteConfig, CONFIG_FILE,
};
use portfolio_site::{
    feeds::{blog_feed, repo_feed},
    Page,
};
use std::path::Path;

/// Loads both feeds concurrently and writes each container's html to
/// `<output_dir>/<container id>.html`. An optional argument names the
/// config file, otherwise the app config directory is used and a default
/// config is written there on first run.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _logger = init_logger("portfolio-site")?;

    let config = match std::env::args().nth(1) {
        Some(path) => load_config_from(Path::new(&path))?,
        None => app_config()
            .await
            .inspect_err(|err| {
                error!("Failed to load config: {err}");
            })
            .unwrap_or_default(),
    };

    debug!("Config: {config:#?}");

    let client = ApiClient::with_end_point(config.github_api.as_str())?;
    let mut page = Page::from_config(&config);

    let (repos, blog) = page.container_pair_mut(&config.repos_container, &config.blog_container);
    tokio::join!(
        repo_feed(repos, &client, &config),
        blog_feed(blog, &client, &config)
    );

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create {:?}", config.output_dir))?;

    for container in page.containers() {
        let path = config.output_dir.join(format!("{}.html", container.id()));
        tokio::fs::write(&path, container.render_html())
            .await
            .with_context(|| format!("Failed to write {path:?}"))?;
        info!("Wrote {path:?}");
    }

    Ok(())
}

/// Config from the app config directory, written with defaults on first run.
async fn app_config() -> anyhow::Result<SiteConfig> {
    load_or_init_config(&config_path(CONFIG_FILE)?).await
}
