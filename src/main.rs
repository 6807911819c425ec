use anyhow::Context;
use tracing::info;
use url::Url;

use client::posts::Client;
use entity::user::UserRole;
use feed::FeedEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = util::load_config("config.toml")?;
    let base_url = Url::parse(&config.api.base_url)
        .context("api.base_url is not a valid url")?;

    let client = Client::new(base_url.as_str(), &config.api.token)?;
    let engine = FeedEngine::new(
        client,
        config.user.id.clone(),
        UserRole::from(config.user.role.clone()),
    );

    info!(task = "start feed engine", user = config.user.id);
    engine.load_initial().await;

    let posts = engine.posts().len();
    let places = engine.places().len();
    info!(task = "initial load done", posts, places);

    Ok(())
}
