//! One pass through the survey, the reflection, and the report.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::reasons::{RankingPhase, RatingPhase, ReasonCatalog, ReasonsError, ReasonsResult};
use crate::report::ReportBundle;
use crate::survey::{
    NavigationError, NavigatorState, OverallResult, Question, ResponseMap, ScoringEngine,
    ScoringPolicy, SurveyCatalog, SurveyNavigator, Theme, ThemeId,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Reasons(#[from] ReasonsError),
    #[error("survey is not complete yet")]
    SurveyIncomplete,
    #[error("reflection is not in the {0} phase")]
    WrongPhase(&'static str),
}

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    ThemeIntro,
    Question,
    Rating,
    Ranking,
    Report,
}

#[derive(Debug, Clone)]
enum ReasonsStage {
    Rating(RatingPhase),
    Ranking(RankingPhase),
}

/// Owns every piece of transient state for a single user run.
#[derive(Debug, Clone)]
pub struct SurveySession {
    catalog: Arc<SurveyCatalog>,
    reasons_catalog: Arc<ReasonCatalog>,
    engine: ScoringEngine,
    navigator: SurveyNavigator,
    intro: Option<ThemeId>,
    outcome: Option<OverallResult>,
    reasons: Option<ReasonsStage>,
    reflection: Option<ReasonsResult>,
}

impl SurveySession {
    pub fn start(
        catalog: Arc<SurveyCatalog>,
        reasons_catalog: Arc<ReasonCatalog>,
    ) -> Result<Self, SessionError> {
        let navigator = SurveyNavigator::start(catalog.clone())?;
        let intro = navigator.active_theme().map(|theme| theme.theme_id.clone());

        Ok(Self {
            catalog,
            reasons_catalog,
            engine: ScoringEngine::new(ScoringPolicy::default()),
            navigator,
            intro,
            outcome: None,
            reasons: None,
            reflection: None,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.outcome, &self.reasons) {
            (None, _) if self.intro.is_some() => SessionPhase::ThemeIntro,
            (None, _) => SessionPhase::Question,
            (Some(_), Some(ReasonsStage::Rating(_))) => SessionPhase::Rating,
            (Some(_), Some(ReasonsStage::Ranking(_))) => SessionPhase::Ranking,
            (Some(_), None) => SessionPhase::Report,
        }
    }

    pub fn catalog(&self) -> &SurveyCatalog {
        &self.catalog
    }

    /// Theme whose interstitial should be shown before its first question.
    pub fn theme_intro(&self) -> Option<&Theme> {
        let id = self.intro.as_ref()?;
        self.catalog
            .themes()
            .iter()
            .find(|theme| &theme.theme_id == id)
    }

    pub fn dismiss_intro(&mut self) {
        self.intro = None;
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.navigator.active_question()
    }

    pub fn progress(&self) -> Option<(usize, usize)> {
        self.navigator.progress()
    }

    /// Answers the active question with one of its options. Completing the survey
    /// scores it and opens the rating phase.
    pub fn answer(&mut self, option_index: usize) -> Result<NavigatorState, SessionError> {
        let state = self.navigator.choose(option_index)?;
        self.intro = None;

        match &state {
            NavigatorState::ThemeBoundary { theme, .. } => {
                self.intro = Some(theme.clone());
            }
            NavigatorState::Completed => {
                let result = self
                    .engine
                    .score(self.navigator.responses(), self.catalog.themes());
                info!(
                    overall_percent = result.overall_percent,
                    rating = %result.rating_for_report,
                    "survey scored"
                );
                self.outcome = Some(result);
                self.reasons = Some(ReasonsStage::Rating(RatingPhase::new(
                    self.reasons_catalog.clone(),
                )));
            }
            NavigatorState::Active { .. } => {}
        }

        Ok(state)
    }

    pub fn result(&self) -> Option<&OverallResult> {
        self.outcome.as_ref()
    }

    pub fn rating_mut(&mut self) -> Option<&mut RatingPhase> {
        match self.reasons.as_mut() {
            Some(ReasonsStage::Rating(phase)) => Some(phase),
            _ => None,
        }
    }

    pub fn ranking_mut(&mut self) -> Option<&mut RankingPhase> {
        match self.reasons.as_mut() {
            Some(ReasonsStage::Ranking(phase)) => Some(phase),
            _ => None,
        }
    }

    pub fn continue_to_ranking(&mut self) -> Result<(), SessionError> {
        match self.reasons.take() {
            Some(ReasonsStage::Rating(phase)) => match phase.into_ranking() {
                Ok(ranking) => {
                    self.reasons = Some(ReasonsStage::Ranking(ranking));
                    Ok(())
                }
                Err(phase) => {
                    let err = phase.incomplete_error();
                    self.reasons = Some(ReasonsStage::Rating(phase));
                    Err(err.into())
                }
            },
            other => {
                self.reasons = other;
                Err(SessionError::WrongPhase("rating"))
            }
        }
    }

    pub fn finish_reflection(&mut self) -> Result<&ReasonsResult, SessionError> {
        match self.reasons.take() {
            Some(ReasonsStage::Ranking(phase)) => match phase.finish() {
                Ok(result) => Ok(&*self.reflection.insert(result)),
                Err(phase) => {
                    self.reasons = Some(ReasonsStage::Ranking(phase));
                    Err(ReasonsError::NoSelection.into())
                }
            },
            other => {
                self.reasons = other;
                Err(SessionError::WrongPhase("ranking"))
            }
        }
    }

    pub fn reflection(&self) -> Option<&ReasonsResult> {
        self.reflection.as_ref()
    }

    /// Report input for the finished survey, with the reflection once it is done.
    pub fn bundle(&self) -> Result<ReportBundle, SessionError> {
        let result = self
            .outcome
            .clone()
            .ok_or(SessionError::SurveyIncomplete)?;
        Ok(ReportBundle::assemble(
            result,
            self.navigator.responses(),
            &self.catalog,
            self.reflection.clone(),
        ))
    }

    pub fn responses(&self) -> &ResponseMap {
        self.navigator.responses()
    }

    /// Drops all answers, scores, and reflection and starts over.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        *self = Self::start(self.catalog.clone(), self.reasons_catalog.clone())?;
        info!("survey session restarted");
        Ok(())
    }
}
