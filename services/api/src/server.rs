use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryReportOutbox};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mastering_money::config::AppConfig;
use mastering_money::error::AppError;
use mastering_money::telemetry;
use std::sync::atomic::Ordering;
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

    let catalog = Arc::new(load_catalog(config.survey.catalog_path.as_deref())?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let outbox = Arc::new(InMemoryReportOutbox::default());

    let app = with_survey_routes(outbox)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        themes = catalog.themes().len(),
        questions = catalog.question_count(),
        "mastering money survey service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
