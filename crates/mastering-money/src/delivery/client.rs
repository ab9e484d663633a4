use crate::report::ReportBundle;
use crate::survey::ResponseMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Body of `POST /api/sendReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReportRequest {
    pub email: String,
    pub results: ReportBundle,
    #[serde(default)]
    pub responses: ResponseMap,
}

/// User-facing state of a report submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    InvalidEmail,
    Sending,
    Sent,
    Failed,
    Error,
    /// A previous submission from this client has not finished yet.
    AlreadySending,
}

impl DeliveryStatus {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::Sending | Self::AlreadySending => "Sending...",
            Self::Sent => "✅ Report sent successfully!",
            Self::Failed => "❌ Failed to send report.",
            Self::Error => "⚠️ Something went wrong while sending the report.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email address is empty")]
    InvalidEmail,
    #[error("a report is already being sent")]
    AlreadySending,
    #[error("report endpoint responded with status {0}")]
    Rejected(u16),
    #[error("report request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DeliveryError {
    pub fn status(&self) -> DeliveryStatus {
        match self {
            Self::InvalidEmail => DeliveryStatus::InvalidEmail,
            Self::AlreadySending => DeliveryStatus::AlreadySending,
            Self::Rejected(_) => DeliveryStatus::Failed,
            Self::Transport(_) => DeliveryStatus::Error,
        }
    }
}

/// Posts finished reports to the delivery endpoint. One submission at a time.
#[derive(Debug)]
pub struct ReportClient {
    http: reqwest::Client,
    endpoint: String,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends the report once. Any 2xx counts as delivered; there is no retry.
    pub async fn send(
        &self,
        email: &str,
        results: &ReportBundle,
        responses: &ResponseMap,
    ) -> Result<(), DeliveryError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DeliveryError::InvalidEmail);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DeliveryError::AlreadySending);
        }
        let _guard = InFlight(&self.in_flight);

        let request = SendReportRequest {
            email: email.to_string(),
            results: results.clone(),
            responses: responses.clone(),
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected(status.as_u16()));
        }

        info!(endpoint = %self.endpoint, status = status.as_u16(), "report delivered");
        Ok(())
    }

    /// [`send`](Self::send) folded into the status shown to the user.
    pub async fn deliver(
        &self,
        email: &str,
        results: &ReportBundle,
        responses: &ResponseMap,
    ) -> DeliveryStatus {
        match self.send(email, results, responses).await {
            Ok(()) => DeliveryStatus::Sent,
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "report delivery failed");
                err.status()
            }
        }
    }
}
