pub mod config;
pub mod delivery;
pub mod error;
pub mod reasons;
pub mod report;
pub mod session;
pub mod survey;
pub mod telemetry;

pub use error::AppError;
pub use session::{SessionError, SessionPhase, SurveySession};
