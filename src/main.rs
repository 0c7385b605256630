use agora::config::Configuration;
use agora::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::default().read();
    init_tracing(config.log_level.as_deref());

    let state = agora::initialize_state(config).await?;
    tracing::info!(
        name = %state.config.name,
        version = state.config.version(),
        "agora is ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    Ok(())
}
