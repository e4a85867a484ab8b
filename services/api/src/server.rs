use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRequestRepository, LoggingNotificationPublisher};
use crate::routes::with_assistance_routes;
use aid_intake::config::AppConfig;
use aid_intake::error::AppError;
use aid_intake::telemetry;
use aid_intake::workflows::assistance::AssistanceRequestService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryRequestRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let service = Arc::new(AssistanceRequestService::new(repository, notifications));

    let app = with_assistance_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_attachment_bytes = config.intake.max_attachment_bytes,
        "assistance intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
