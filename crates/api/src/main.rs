use anyhow::Context;

use printstock_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    printstock_observability::init(config.log_format);
    tracing::debug!(?config, "configuration loaded");

    let app = printstock_api::app::build_app(&config).context("failed to initialize stock store")?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let addr = listener.local_addr()?;
    tracing::info!("print stock api listening on http://{addr}");
    if config.static_dir.is_some() {
        tracing::info!("admin panel at http://{addr}/admin");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
