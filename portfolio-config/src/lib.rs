//! Configuration for the portfolio site tools.
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use app_dirs2::{get_app_dir, get_app_root, AppDataType, AppInfo};
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LoggerHandle, Naming};
use log::info;
use portfolio_api::{ApiClient, FeedSource};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "site_config.json";

/// Application information.
pub const APP_INFO: AppInfo = AppInfo {
    name: "Portfolio Site",
    author: "Somebody",
};

/// Site configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// GitHub user whose repositories are listed.
    pub github_user: String,
    /// GitHub API base url.
    pub github_api: String,
    /// Base url for raw repository content (preview images).
    pub raw_content: String,
    /// Number of repositories to list.
    pub repo_limit: usize,
    /// Generated blog feed document.
    pub blog_feed: FeedSource,
    /// Container id for repository cards.
    pub repos_container: String,
    /// Container id for blog post cards.
    pub blog_container: String,
    /// Class set on the document root while navigating with the keyboard.
    pub marker_class: String,
    /// Scroll offset above which the back to top button is shown.
    pub scroll_threshold: f64,
    /// Where rendered container fragments are written.
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            github_user: "kemalsanli".to_string(),
            github_api: ApiClient::API_END_POINT.to_string(),
            raw_content: "https://raw.githubusercontent.com".to_string(),
            repo_limit: 6,
            blog_feed: FeedSource::from("./data/medium.json"),
            repos_container: "latest-repos".to_string(),
            blog_container: "blog-list".to_string(),
            marker_class: "user-is-tabbing".to_string(),
            scroll_threshold: 700.,
            output_dir: PathBuf::from("dist"),
        }
    }
}

/// Path of `file_name` in the application config directory.
pub fn config_path(file_name: &str) -> anyhow::Result<PathBuf> {
    let config_dir = get_app_root(AppDataType::UserConfig, &APP_INFO).context("No app root")?;
    Ok(config_dir.join(file_name))
}

/// Save the configuration, creating parent directories as needed.
pub async fn save_config(config: &SiteConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(config_dir) = path.parent().filter(|dir| !dir.exists()) {
        tokio::fs::create_dir_all(config_dir).await?;
    }

    let contents = serde_json::to_vec_pretty(config)?;
    tokio::fs::write(path, &contents).await?;
    info!("Wrote to config file: {path:?}");

    Ok(())
}

/// Load the configuration at `path`. When there is no file yet the defaults
/// are written there so they can be edited.
pub async fn load_or_init_config(path: &Path) -> anyhow::Result<SiteConfig> {
    if path.exists() {
        return load_config_from(path);
    }

    let config = SiteConfig::default();
    save_config(&config, path).await?;
    Ok(config)
}

/// Load the configuration from an explicit path. Missing keys take their
/// default value.
pub fn load_config_from(path: &Path) -> anyhow::Result<SiteConfig> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read config {path:?}"))?;
    let config = serde_json::from_slice(&content)
        .with_context(|| format!("Invalid config file {path:?}"))?;

    Ok(config)
}

/// Get the shared log directory.
pub fn log_dir() -> anyhow::Result<PathBuf> {
    get_app_dir(AppDataType::UserData, &APP_INFO, "logs")
        .context("Failed to get app logs directory")
}

/// Start logging to rotating files in [`log_dir`]. The returned handle must
/// be kept alive for the duration of the program.
pub fn init_logger(basename: &str) -> anyhow::Result<LoggerHandle> {
    let logger = flexi_logger::Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory(log_dir()?).basename(basename))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .print_message()
        .start()?;
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::{load_config_from, load_or_init_config, SiteConfig};
    use portfolio_api::FeedSource;

    #[test]
    fn partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_config.json");
        std::fs::write(
            &path,
            r#"{ "github_user": "octocat", "blog_feed": "https://example.com/medium.json" }"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.github_user, "octocat");
        assert_eq!(
            config.blog_feed,
            FeedSource::Url("https://example.com/medium.json".to_string())
        );
        assert_eq!(config.repo_limit, 6);
        assert_eq!(config.scroll_threshold, 700.);
        assert_eq!(config.repos_container, "latest-repos");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SiteConfig::default();
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains(r#""blog_feed":"./data/medium.json""#));
        assert_eq!(serde_json::from_str::<SiteConfig>(&json).unwrap(), config);
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(&dir.path().join("nope.json")).is_err());
    }

    #[tokio::test]
    async fn missing_config_is_initialised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio").join("site_config.json");

        let config = load_or_init_config(&path).await.unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[tokio::test]
    async fn existing_config_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_config.json");
        std::fs::write(&path, r#"{ "repo_limit": 3 }"#).unwrap();

        let config = load_or_init_config(&path).await.unwrap();

        assert_eq!(config.repo_limit, 3);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{ "repo_limit": 3 }"#
        );
    }

    #[tokio::test]
    async fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_or_init_config(&path).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
