use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative label derived from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RatingLabel {
    FailingWithMoney,
    NeedHelpWithMoney,
    PoorWithMoney,
    OkWithMoney,
    GoodWithMoney,
    GreatAtMoney,
    MoneyMaster,
}

/// Inclusive lower bounds, checked from the top down.
const LADDER: [(u32, RatingLabel); 6] = [
    (90, RatingLabel::MoneyMaster),
    (80, RatingLabel::GreatAtMoney),
    (70, RatingLabel::GoodWithMoney),
    (60, RatingLabel::OkWithMoney),
    (50, RatingLabel::PoorWithMoney),
    (40, RatingLabel::NeedHelpWithMoney),
];

impl RatingLabel {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::MoneyMaster,
            Self::GreatAtMoney,
            Self::GoodWithMoney,
            Self::OkWithMoney,
            Self::PoorWithMoney,
            Self::NeedHelpWithMoney,
            Self::FailingWithMoney,
        ]
    }

    pub fn for_percent(overall_percent: u32) -> Self {
        LADDER
            .iter()
            .find(|(threshold, _)| overall_percent >= *threshold)
            .map(|(_, label)| *label)
            .unwrap_or(Self::FailingWithMoney)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MoneyMaster => "💎 Money Master",
            Self::GreatAtMoney => "🌟 Great at Money",
            Self::GoodWithMoney => "👍 Good with Money",
            Self::OkWithMoney => "🙂 OK with Money",
            Self::PoorWithMoney => "😕 Poor with Money",
            Self::NeedHelpWithMoney => "⚠️ Need Help with Money",
            Self::FailingWithMoney => "🚨 Failing with Money",
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown rating label '{0}'")]
pub struct UnknownRatingLabel(String);

impl FromStr for RatingLabel {
    type Err = UnknownRatingLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|label| label.label() == trimmed)
            .ok_or_else(|| UnknownRatingLabel(value.to_string()))
    }
}

impl TryFrom<String> for RatingLabel {
    type Error = UnknownRatingLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RatingLabel> for &'static str {
    fn from(value: RatingLabel) -> Self {
        value.label()
    }
}
