use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ax = lms_web::build()?;
    let addr = lms_web::config::listen_addr(&ax.app);

    ax.listen(addr).await?;

    Ok(())
}
