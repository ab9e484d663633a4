use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::client::{DeliveryStatus, SendReportRequest};
use crate::report::{render_text, ReportDocument};
use crate::survey::RatingLabel;

/// Rendered report ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEnvelope {
    pub email: String,
    pub subject: String,
    pub body: String,
    pub overall_percent: u32,
    pub received_at: DateTime<Utc>,
}

/// Sink for received reports (e-mail relay, queue, or an in-memory list in tests).
pub trait ReportOutbox: Send + Sync {
    fn deliver(&self, envelope: ReportEnvelope) -> Result<(), OutboxError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("outbox unavailable: {0}")]
    Unavailable(String),
}

/// Router builder exposing the report delivery endpoint.
pub fn delivery_router<O>(outbox: Arc<O>) -> Router
where
    O: ReportOutbox + 'static,
{
    Router::new()
        .route("/api/sendReport", post(send_report_handler::<O>))
        .with_state(outbox)
}

pub(crate) async fn send_report_handler<O>(
    State(outbox): State<Arc<O>>,
    axum::Json(request): axum::Json<SendReportRequest>,
) -> Response
where
    O: ReportOutbox + 'static,
{
    let email = request.email.trim();
    if !is_plausible_email(email) {
        let payload = json!({
            "error": DeliveryStatus::InvalidEmail.message(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    // The rating label always follows the submitted percentage.
    let mut results = request.results;
    let overall_percent = results.result.overall_percent;
    results.result.rating_for_report = RatingLabel::for_percent(overall_percent);

    let received_at = Utc::now();
    let document = ReportDocument::from_bundle(&results, received_at);
    let envelope = ReportEnvelope {
        email: email.to_string(),
        subject: format!(
            "Your Mastering Money report: {}",
            results.result.rating_for_report
        ),
        body: render_text(&document),
        overall_percent,
        received_at,
    };

    match outbox.deliver(envelope) {
        Ok(()) => {
            info!(
                pages = document.page_count(),
                answered = request.responses.len(),
                "report queued for delivery"
            );
            (StatusCode::ACCEPTED, axum::Json(json!({ "status": "queued" }))).into_response()
        }
        Err(err) => {
            warn!(error = %err, "report outbox rejected delivery");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

/// One `@` with a non-empty local part and a dotted domain; no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportBundle;
    use crate::survey::{score, QuestionId, ResponseMap, SurveyCatalog};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingOutbox {
        envelopes: Mutex<Vec<ReportEnvelope>>,
        fail: bool,
    }

    impl ReportOutbox for RecordingOutbox {
        fn deliver(&self, envelope: ReportEnvelope) -> Result<(), OutboxError> {
            if self.fail {
                return Err(OutboxError::Unavailable("smtp relay offline".to_string()));
            }
            self.envelopes
                .lock()
                .map_err(|_| OutboxError::Unavailable("poisoned".to_string()))?
                .push(envelope);
            Ok(())
        }
    }

    fn request_body(email: &str) -> Body {
        request_body_with(email, |_| {})
    }

    fn request_body_with(email: &str, edit: impl FnOnce(&mut ReportBundle)) -> Body {
        let catalog = SurveyCatalog::standard().expect("standard catalog");
        let responses: ResponseMap = [(QuestionId::from("1.1"), 4)].into_iter().collect();
        let mut bundle = ReportBundle::assemble(
            score(&responses, catalog.themes()),
            &responses,
            &catalog,
            None,
        );
        edit(&mut bundle);
        let request = SendReportRequest {
            email: email.to_string(),
            results: bundle,
            responses,
        };
        Body::from(serde_json::to_vec(&request).expect("serializes"))
    }

    fn post(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/sendReport")
            .header("content-type", "application/json")
            .body(body)
            .expect("request")
    }

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("sam@example.com"));
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("sam"));
        assert!(!is_plausible_email("sam@localhost"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("sam @example.com"));
        assert!(!is_plausible_email("sam@example.com."));
    }

    #[tokio::test]
    async fn queues_rendered_report() {
        let outbox = Arc::new(RecordingOutbox::default());
        let app = delivery_router(outbox.clone());

        let response = app
            .oneshot(post(request_body(" sam@example.com ")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(json["status"], "queued");

        let envelopes = outbox.envelopes.lock().expect("lock");
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].email, "sam@example.com");
        assert!(envelopes[0].body.contains("Mastering Money Report"));
        assert!(envelopes[0].subject.contains("Failing with Money"));
    }

    #[tokio::test]
    async fn rating_follows_submitted_percent() {
        let outbox = Arc::new(RecordingOutbox::default());
        let app = delivery_router(outbox.clone());

        let body = request_body_with("sam@example.com", |bundle| {
            bundle.result.rating_for_report = RatingLabel::MoneyMaster;
        });
        let response = app.oneshot(post(body)).await.expect("response");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let envelopes = outbox.envelopes.lock().expect("lock");
        assert_eq!(envelopes[0].overall_percent, 8);
        assert!(envelopes[0].subject.contains("Failing with Money"));
        assert!(!envelopes[0].subject.contains("Money Master"));
        assert!(!envelopes[0].body.contains("Money Master"));
    }

    #[tokio::test]
    async fn rejects_invalid_email() {
        let outbox = Arc::new(RecordingOutbox::default());
        let app = delivery_router(outbox.clone());

        let response = app
            .oneshot(post(request_body("not-an-email")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(outbox.envelopes.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn outbox_failure_is_a_bad_gateway() {
        let outbox = Arc::new(RecordingOutbox {
            fail: true,
            ..RecordingOutbox::default()
        });
        let app = delivery_router(outbox);

        let response = app
            .oneshot(post(request_body("sam@example.com")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
