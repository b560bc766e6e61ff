use crate::cli::ServeArgs;
use crate::infra::{demo_provider, AppState};
use crate::routes::with_tiering_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use underwriting::config::AppConfig;
use underwriting::error::AppError;
use underwriting::telemetry;
use underwriting::workflows::tiering::TieringService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let provider = Arc::new(demo_provider());
    let tiering_service = Arc::new(TieringService::new(provider));

    let app = with_tiering_routes(tiering_service)
        .layer(Extension(app_state))
        .layer(Extension(config.batch))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        batch_max_rows = config.batch.max_rows,
        "underwriting tier review service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
