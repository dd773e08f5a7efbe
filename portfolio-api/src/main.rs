use anyhow::Error;
use portfolio_api::ApiClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let user = std::env::args().nth(1).unwrap_or("kemalsanli".to_string());
    let client = ApiClient::new()?;
    let repos = client.latest_repos(&user, 6).await?;

    for (repo, languages) in client.repos_with_languages(repos).await {
        println!(
            "{} url: {}, languages: {}",
            repo.name,
            repo.html_url,
            languages.join(", ")
        );
    }

    Ok(())
}
