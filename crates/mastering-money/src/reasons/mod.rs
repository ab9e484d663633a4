//! Post-survey reflection: rate preset and custom barriers, then rank the top three.

pub mod catalog;
pub mod domain;
pub mod phases;

pub use catalog::ReasonCatalog;
pub use domain::{
    RankedReason, Reason, ReasonAnswer, ReasonId, ReasonResponse, ReasonsError, ReasonsResult,
};
pub use phases::{
    RankingPhase, RatingPhase, ReasonResponses, ToggleOutcome, MAX_CUSTOM_REASONS,
    MAX_RANKED_REASONS, RATING_PAGE_SIZE,
};
