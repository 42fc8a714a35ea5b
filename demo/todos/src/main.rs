/* demo/todos/src/main.rs */

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let router = pagekit_demo::app()?;
  let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
  tracing::info!("pagekit demo running on http://localhost:{}", listener.local_addr()?.port());
  axum::serve(listener, router).await?;
  Ok(())
}
