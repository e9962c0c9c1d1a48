use std::sync::Arc;

use anyhow::Context;

use stockcheck_api::app::{self, services::AppServices};
use stockcheck_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    stockcheck_observability::init(config.log_format);

    let services = AppServices::from_config(&config).context("failed to load inventory catalog")?;
    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
