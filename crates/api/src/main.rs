use anyhow::Context;

use gatehouse_api::{
    app::{build_app, services::build_services},
    config::AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatehouse_observability::init();

    let config = AppConfig::load().context("loading configuration")?;
    let services = build_services(&config).await?;
    let app = build_app(&config, services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %config.auth.mount_prefix,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
