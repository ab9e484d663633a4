use super::catalog::SurveyCatalog;
use super::domain::{NextStep, Question, QuestionId, ResponseMap, Theme, ThemeId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavigatorState {
    /// Next question belongs to the same theme as the one just answered.
    Active { question: QuestionId },
    /// Next question opens a different theme; the UI may show its intro first.
    ThemeBoundary { question: QuestionId, theme: ThemeId },
    /// Terminal answer recorded; the caller should score the responses.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("survey catalog has no questions")]
    EmptyCatalog,
    #[error("survey is already complete")]
    AlreadyComplete,
    #[error("question {actual} is not active (active question is {expected})")]
    NotActive {
        expected: QuestionId,
        actual: QuestionId,
    },
    #[error("answer to {question} points to unknown question {target}")]
    UnknownNext {
        question: QuestionId,
        target: QuestionId,
    },
    #[error("question {question} has no option #{index}")]
    UnknownOption { question: QuestionId, index: usize },
}

/// Walks the question graph one answer at a time.
///
/// Re-answering a question overwrites its earlier value without rewinding the path
/// taken since. Revisits are allowed; the catalog author is responsible for a graph
/// that terminates (see [`SurveyCatalog::lint`]).
#[derive(Debug, Clone)]
pub struct SurveyNavigator {
    catalog: Arc<SurveyCatalog>,
    active: Option<QuestionId>,
    responses: ResponseMap,
}

impl SurveyNavigator {
    /// Positions the navigator on the catalog's opening question.
    pub fn start(catalog: Arc<SurveyCatalog>) -> Result<Self, NavigationError> {
        let first = catalog
            .first_question()
            .map(|question| question.id.clone())
            .ok_or(NavigationError::EmptyCatalog)?;

        debug!(question = %first, "survey navigation started");

        Ok(Self {
            catalog,
            active: Some(first),
            responses: ResponseMap::new(),
        })
    }

    pub fn catalog(&self) -> &SurveyCatalog {
        &self.catalog
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active.as_ref().and_then(|id| self.catalog.question(id))
    }

    pub fn active_theme(&self) -> Option<&Theme> {
        self.active.as_ref().and_then(|id| self.catalog.theme_of(id))
    }

    pub fn is_complete(&self) -> bool {
        self.active.is_none()
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn into_responses(self) -> ResponseMap {
        self.responses
    }

    /// 1-based catalog position of the active question and the catalog's question count.
    pub fn progress(&self) -> Option<(usize, usize)> {
        let position = self
            .active
            .as_ref()
            .and_then(|id| self.catalog.position_of(id))?;
        Some((position + 1, self.catalog.question_count()))
    }

    /// Records `value` for the active question and moves to `next`.
    ///
    /// Rejected transitions leave the navigator untouched.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        value: u32,
        next: &NextStep,
    ) -> Result<NavigatorState, NavigationError> {
        let active = self.active.as_ref().ok_or(NavigationError::AlreadyComplete)?;
        if active != question_id {
            return Err(NavigationError::NotActive {
                expected: active.clone(),
                actual: question_id.clone(),
            });
        }

        let next_question = match next {
            NextStep::End => None,
            NextStep::Question(target) => {
                if !self.catalog.contains(target) {
                    return Err(NavigationError::UnknownNext {
                        question: question_id.clone(),
                        target: target.clone(),
                    });
                }
                Some(target.clone())
            }
        };

        self.responses.record(question_id.clone(), value);

        let Some(next_id) = next_question else {
            self.active = None;
            info!(answered = self.responses.len(), "survey completed");
            return Ok(NavigatorState::Completed);
        };

        let previous_theme = self.catalog.theme_of(question_id).map(|t| &t.theme_id);
        let next_theme = self.catalog.theme_of(&next_id).map(|t| &t.theme_id);
        let state = match next_theme {
            Some(theme) if previous_theme != Some(theme) => NavigatorState::ThemeBoundary {
                question: next_id.clone(),
                theme: theme.clone(),
            },
            _ => NavigatorState::Active {
                question: next_id.clone(),
            },
        };

        debug!(from = %question_id, to = %next_id, value, "survey advanced");
        self.active = Some(next_id);
        Ok(state)
    }

    /// Answers the active question with the option at `index`.
    pub fn choose(&mut self, index: usize) -> Result<NavigatorState, NavigationError> {
        let question = self
            .active_question()
            .ok_or(NavigationError::AlreadyComplete)?;
        let option = question
            .options
            .get(index)
            .ok_or_else(|| NavigationError::UnknownOption {
                question: question.id.clone(),
                index,
            })?;

        let question_id = question.id.clone();
        let value = option.value;
        let next = option.next.clone();
        self.answer(&question_id, value, &next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::domain::AnswerOption;

    fn catalog() -> Arc<SurveyCatalog> {
        let question = |id: &str, next: NextStep| Question {
            id: QuestionId::from(id),
            text: format!("Question {id}"),
            options: vec![
                AnswerOption {
                    label: "Low".to_string(),
                    value: 0,
                    next: next.clone(),
                },
                AnswerOption {
                    label: "High".to_string(),
                    value: 2,
                    next,
                },
            ],
        };
        let theme = |id: &str, questions: Vec<Question>| Theme {
            theme_id: ThemeId::from(id),
            theme_name: format!("Theme {id}"),
            description: String::new(),
            questions,
        };

        Arc::new(
            SurveyCatalog::new(vec![
                theme(
                    "1",
                    vec![
                        question("1.1", NextStep::question("1.2")),
                        question("1.2", NextStep::question("2.1")),
                    ],
                ),
                theme("2", vec![question("2.1", NextStep::End)]),
            ])
            .expect("valid catalog"),
        )
    }

    #[test]
    fn starts_on_first_question_with_progress() {
        let navigator = SurveyNavigator::start(catalog()).expect("starts");
        assert_eq!(
            navigator.active_question().map(|q| q.id.as_str()),
            Some("1.1")
        );
        assert_eq!(navigator.progress(), Some((1, 3)));
    }

    #[test]
    fn empty_catalog_cannot_start() {
        let empty = Arc::new(SurveyCatalog::new(Vec::new()).expect("empty is valid"));
        assert_eq!(
            SurveyNavigator::start(empty).unwrap_err(),
            NavigationError::EmptyCatalog
        );
    }

    #[test]
    fn signals_theme_boundary_and_completion() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");

        let state = navigator.choose(1).expect("1.1 answered");
        assert_eq!(
            state,
            NavigatorState::Active {
                question: QuestionId::from("1.2")
            }
        );

        let state = navigator.choose(0).expect("1.2 answered");
        assert_eq!(
            state,
            NavigatorState::ThemeBoundary {
                question: QuestionId::from("2.1"),
                theme: ThemeId::from("2"),
            }
        );

        let state = navigator.choose(1).expect("2.1 answered");
        assert_eq!(state, NavigatorState::Completed);
        assert!(navigator.is_complete());
        assert_eq!(navigator.progress(), None);
        assert_eq!(navigator.responses().len(), 3);
    }

    #[test]
    fn rejects_answers_for_inactive_questions() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");
        let err = navigator
            .answer(&QuestionId::from("2.1"), 2, &NextStep::End)
            .expect_err("not active");

        assert!(matches!(err, NavigationError::NotActive { .. }));
        assert!(navigator.responses().is_empty());
    }

    #[test]
    fn unknown_next_is_rejected_without_recording() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");
        let err = navigator
            .answer(&QuestionId::from("1.1"), 2, &NextStep::question("7.7"))
            .expect_err("unknown next");

        assert!(matches!(err, NavigationError::UnknownNext { .. }));
        assert!(navigator.responses().is_empty());
        assert_eq!(
            navigator.active_question().map(|q| q.id.as_str()),
            Some("1.1")
        );
    }

    #[test]
    fn revisiting_overwrites_the_previous_answer() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");
        let first = QuestionId::from("1.1");

        navigator
            .answer(&first, 2, &NextStep::question("1.2"))
            .expect("advance");
        navigator
            .answer(&QuestionId::from("1.2"), 0, &NextStep::question("1.1"))
            .expect("loop back");
        navigator
            .answer(&first, 0, &NextStep::question("1.2"))
            .expect("re-answer");

        assert_eq!(navigator.responses().get(&first), Some(0));
        assert_eq!(navigator.responses().len(), 2);
    }

    #[test]
    fn answering_after_completion_fails() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");
        navigator
            .answer(&QuestionId::from("1.1"), 2, &NextStep::End)
            .expect("early end");

        assert_eq!(navigator.choose(0).unwrap_err(), NavigationError::AlreadyComplete);
    }

    #[test]
    fn choose_rejects_out_of_range_option() {
        let mut navigator = SurveyNavigator::start(catalog()).expect("starts");
        let err = navigator.choose(5).expect_err("out of range");
        assert!(matches!(err, NavigationError::UnknownOption { index: 5, .. }));
    }
}
