#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let app = storefront_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
