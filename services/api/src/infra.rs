use mastering_money::delivery::{OutboxError, ReportEnvelope, ReportOutbox};
use mastering_money::error::AppError;
use mastering_money::survey::SurveyCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<SurveyCatalog>,
}

/// Keeps received reports in memory until a mail relay is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReportOutbox {
    envelopes: Arc<Mutex<Vec<ReportEnvelope>>>,
}

impl ReportOutbox for InMemoryReportOutbox {
    fn deliver(&self, envelope: ReportEnvelope) -> Result<(), OutboxError> {
        let mut guard = self
            .envelopes
            .lock()
            .map_err(|_| OutboxError::Unavailable("outbox mutex poisoned".to_string()))?;
        guard.push(envelope);
        Ok(())
    }
}

impl InMemoryReportOutbox {
    pub(crate) fn envelopes(&self) -> Vec<ReportEnvelope> {
        self.envelopes
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Loads the configured catalog, or the built-in questionnaire when no path is set.
/// Lint findings are logged but do not stop startup.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<SurveyCatalog, AppError> {
    let catalog = match path {
        Some(path) => {
            let catalog = SurveyCatalog::from_path(path)?;
            info!(path = %path.display(), questions = catalog.question_count(), "survey catalog loaded");
            catalog
        }
        None => SurveyCatalog::standard()?,
    };

    for lint in catalog.lint() {
        warn!(%lint, "survey catalog lint");
    }

    Ok(catalog)
}
