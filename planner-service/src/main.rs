use planner_service::config::PlannerConfig;
use planner_service::services::init_metrics;
use planner_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if storage settings are missing
    let config = PlannerConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(
        "planner-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )
    .map_err(AppError::InternalError)?;

    init_metrics().map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.models.text_model,
        "Starting planner service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Planner service stopped");
    Ok(())
}
