use serde::{Deserialize, Serialize};
use std::fmt;

/// `r1..r27` for presets, `c1..c3` for user-authored reasons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonId(pub String);

impl ReasonId {
    pub fn custom(slot: usize) -> Self {
        Self(format!("c{slot}"))
    }

    pub fn is_custom(&self) -> bool {
        self.0.starts_with('c')
    }
}

impl fmt::Display for ReasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReasonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub id: ReasonId,
    pub text: String,
}

impl Reason {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ReasonId(id.into()),
            text: text.into(),
        }
    }

    /// Blank custom reasons are dropped from every downstream list.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonAnswer {
    Yes,
    Somewhat,
    No,
    #[default]
    #[serde(rename = "Not answered")]
    NotAnswered,
}

impl ReasonAnswer {
    /// Choices offered during the rating phase.
    pub const fn choices() -> [Self; 3] {
        [Self::Yes, Self::Somewhat, Self::No]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Somewhat => "Somewhat",
            Self::No => "No",
            Self::NotAnswered => "Not answered",
        }
    }

    /// `Yes` and `Somewhat` make a reason eligible for ranking.
    pub const fn is_affirmative(self) -> bool {
        matches!(self, Self::Yes | Self::Somewhat)
    }

    pub const fn is_answered(self) -> bool {
        !matches!(self, Self::NotAnswered)
    }
}

impl fmt::Display for ReasonAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonResponse {
    pub id: ReasonId,
    pub text: String,
    pub answer: ReasonAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedReason {
    pub id: ReasonId,
    pub text: String,
}

/// Assembled output of both reflection phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonsResult {
    pub responses: Vec<ReasonResponse>,
    pub top_three: Vec<RankedReason>,
}

impl ReasonsResult {
    /// Responses other than `Not answered`, as listed in reports.
    pub fn answered(&self) -> impl Iterator<Item = &ReasonResponse> {
        self.responses
            .iter()
            .filter(|response| response.answer.is_answered())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReasonsError {
    #[error("reason {0} is not part of this reflection")]
    UnknownReason(ReasonId),
    #[error("reason {0} is not a custom reason")]
    NotCustom(ReasonId),
    #[error("rating is on page {page} of {page_count}; reach the last page before ranking")]
    RatingIncomplete { page: usize, page_count: usize },
    #[error("select at least one barrier before finishing")]
    NoSelection,
}
