//! Sending finished reports: the HTTP client and the receiving route.

pub mod client;
pub mod router;

pub use client::{DeliveryError, DeliveryStatus, ReportClient, SendReportRequest};
pub use router::{delivery_router, is_plausible_email, OutboxError, ReportEnvelope, ReportOutbox};
