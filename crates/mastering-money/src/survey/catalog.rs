use super::blueprint::SurveyBlueprint;
use super::domain::{NextStep, Question, QuestionId, Theme, ThemeId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Structural problems that make a catalog unusable.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("theme id {0} is declared more than once")]
    DuplicateTheme(ThemeId),
    #[error("question id {0} is declared more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question {0} has no answer options")]
    NoOptions(QuestionId),
    #[error("question {question} points to unknown next question {target}")]
    DanglingNext {
        question: QuestionId,
        target: QuestionId,
    },
    #[error("failed to read survey catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid survey catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Advisory findings about a structurally valid catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogLint {
    /// Answering `from` can lead back to `to`, so a session may revisit questions.
    Cycle { from: QuestionId, to: QuestionId },
    /// No path from the opening question reaches this question.
    Unreachable { question: QuestionId },
    /// Once here, no sequence of answers ends the survey.
    NonTerminating { question: QuestionId },
    /// Question id prefix does not match its owning theme id.
    MisplacedQuestionId { question: QuestionId, theme: ThemeId },
}

impl fmt::Display for CatalogLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLint::Cycle { from, to } => {
                write!(f, "answering {from} can return to {to} (cycle)")
            }
            CatalogLint::Unreachable { question } => {
                write!(f, "question {question} is unreachable from the opening question")
            }
            CatalogLint::NonTerminating { question } => {
                write!(f, "no answer path from {question} ends the survey")
            }
            CatalogLint::MisplacedQuestionId { question, theme } => {
                write!(f, "question {question} does not follow the {theme}.<n> id format")
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct QuestionSlot {
    theme: usize,
    question: usize,
    position: usize,
}

/// Validated, read-only survey definition with an id index built once at load.
#[derive(Debug, Clone)]
pub struct SurveyCatalog {
    themes: Vec<Theme>,
    index: HashMap<QuestionId, QuestionSlot>,
    question_count: usize,
}

impl SurveyCatalog {
    pub fn new(themes: Vec<Theme>) -> Result<Self, CatalogError> {
        let mut theme_ids = HashSet::new();
        let mut index = HashMap::new();
        let mut position = 0;

        for (theme_idx, theme) in themes.iter().enumerate() {
            if !theme_ids.insert(theme.theme_id.clone()) {
                return Err(CatalogError::DuplicateTheme(theme.theme_id.clone()));
            }

            for (question_idx, question) in theme.questions.iter().enumerate() {
                if question.options.is_empty() {
                    return Err(CatalogError::NoOptions(question.id.clone()));
                }

                let slot = QuestionSlot {
                    theme: theme_idx,
                    question: question_idx,
                    position,
                };
                if index.insert(question.id.clone(), slot).is_some() {
                    return Err(CatalogError::DuplicateQuestion(question.id.clone()));
                }
                position += 1;
            }
        }

        for question in themes.iter().flat_map(|theme| &theme.questions) {
            for option in &question.options {
                if let NextStep::Question(target) = &option.next {
                    if !index.contains_key(target) {
                        return Err(CatalogError::DanglingNext {
                            question: question.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        debug!(themes = themes.len(), questions = position, "survey catalog indexed");

        Ok(Self {
            themes,
            index,
            question_count: position,
        })
    }

    /// The built-in Mastering Money questionnaire.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(SurveyBlueprint::standard().into_themes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let themes: Vec<Theme> = serde_json::from_reader(reader)?;
        Self::new(themes)
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.themes.iter().flat_map(|theme| &theme.questions).next()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.index
            .get(id)
            .map(|slot| &self.themes[slot.theme].questions[slot.question])
    }

    pub fn theme_of(&self, id: &QuestionId) -> Option<&Theme> {
        self.index.get(id).map(|slot| &self.themes[slot.theme])
    }

    /// Zero-based catalog-order position of a question.
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.index.get(id).map(|slot| slot.position)
    }

    /// Walks the question graph from the opening question and reports findings that
    /// do not block a session but usually indicate an authoring mistake.
    pub fn lint(&self) -> Vec<CatalogLint> {
        let mut lints = Vec::new();

        for theme in &self.themes {
            for question in &theme.questions {
                if question.id.theme_prefix() != Some(theme.theme_id.0.as_str()) {
                    lints.push(CatalogLint::MisplacedQuestionId {
                        question: question.id.clone(),
                        theme: theme.theme_id.clone(),
                    });
                }
            }
        }

        let Some(start) = self.first_question() else {
            return lints;
        };

        let mut marks = HashMap::new();
        self.visit(&start.id, &mut marks, &mut lints);

        let terminating = self.terminating_questions();
        for question in self.themes.iter().flat_map(|theme| &theme.questions) {
            if !marks.contains_key(&question.id) {
                lints.push(CatalogLint::Unreachable {
                    question: question.id.clone(),
                });
            } else if !terminating.contains(&question.id) {
                lints.push(CatalogLint::NonTerminating {
                    question: question.id.clone(),
                });
            }
        }

        lints
    }

    fn visit<'a>(
        &'a self,
        id: &'a QuestionId,
        marks: &mut HashMap<&'a QuestionId, Visit>,
        lints: &mut Vec<CatalogLint>,
    ) {
        marks.insert(id, Visit::Active);

        if let Some(question) = self.question(id) {
            for target in question.options.iter().filter_map(|o| o.next.question_id()) {
                match marks.get(target) {
                    Some(Visit::Active) => {
                        let lint = CatalogLint::Cycle {
                            from: id.clone(),
                            to: target.clone(),
                        };
                        if !lints.contains(&lint) {
                            lints.push(lint);
                        }
                    }
                    Some(Visit::Done) => {}
                    None => self.visit(target, marks, lints),
                }
            }
        }

        marks.insert(id, Visit::Done);
    }

    fn terminating_questions(&self) -> HashSet<&QuestionId> {
        let questions: Vec<&Question> = self
            .themes
            .iter()
            .flat_map(|theme| &theme.questions)
            .collect();
        let mut terminating: HashSet<&QuestionId> = HashSet::new();

        loop {
            let before = terminating.len();
            for question in questions.iter().copied() {
                if terminating.contains(&question.id) {
                    continue;
                }
                let exits = question.options.iter().any(|option| match &option.next {
                    NextStep::End => true,
                    NextStep::Question(target) => terminating.contains(target),
                });
                if exits {
                    terminating.insert(&question.id);
                }
            }
            if terminating.len() == before {
                break;
            }
        }

        terminating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Active,
    Done,
}
