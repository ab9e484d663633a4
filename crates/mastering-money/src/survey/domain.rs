use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Graph node key for a question, formatted `"<theme>.<n>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Theme prefix of the id (`"3"` for `"3.2"`), when the id follows the convention.
    pub fn theme_prefix(&self) -> Option<&str> {
        self.0.split_once('.').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(pub String);

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

const END_SENTINEL: &str = "End";

/// Where an answer leads: another question, or the end of the survey.
///
/// Catalog JSON spells the terminal sentinel as `null` or `"End"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum NextStep {
    Question(QuestionId),
    End,
}

impl NextStep {
    pub fn question(id: impl Into<String>) -> Self {
        Self::Question(QuestionId(id.into()))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End)
    }

    pub fn question_id(&self) -> Option<&QuestionId> {
        match self {
            Self::Question(id) => Some(id),
            Self::End => None,
        }
    }
}

impl From<Option<String>> for NextStep {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if id.trim() != END_SENTINEL && !id.trim().is_empty() => {
                Self::Question(QuestionId(id.trim().to_string()))
            }
            _ => Self::End,
        }
    }
}

impl From<NextStep> for Option<String> {
    fn from(value: NextStep) -> Self {
        match value {
            NextStep::Question(id) => Some(id.0),
            NextStep::End => Some(END_SENTINEL.to_string()),
        }
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::Question(id) => write!(f, "{id}"),
            NextStep::End => f.write_str(END_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: u32,
    pub next: NextStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// First option carrying `value`, used to recover the chosen label for reports.
    pub fn option_for_value(&self, value: u32) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn max_value(&self) -> u32 {
        self.options
            .iter()
            .map(|option| option.value)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub theme_id: ThemeId,
    pub theme_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Selected value per answered question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<QuestionId, u32>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the answer, returning the value it replaced.
    pub fn record(&mut self, question: QuestionId, value: u32) -> Option<u32> {
        self.0.insert(question, value)
    }

    pub fn get(&self, question: &QuestionId) -> Option<u32> {
        self.0.get(question).copied()
    }

    pub fn contains(&self, question: &QuestionId) -> bool {
        self.0.contains_key(question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, u32)> {
        self.0.iter().map(|(id, value)| (id, *value))
    }
}

impl FromIterator<(QuestionId, u32)> for ResponseMap {
    fn from_iter<T: IntoIterator<Item = (QuestionId, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
