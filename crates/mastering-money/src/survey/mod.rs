//! Themed questionnaire: catalog, navigation over the question graph, and scoring.

mod blueprint;
pub mod catalog;
pub mod domain;
pub mod import;
pub mod navigator;
pub mod scoring;

pub use blueprint::SurveyBlueprint;
pub use catalog::{CatalogError, CatalogLint, SurveyCatalog};
pub use domain::{AnswerOption, NextStep, Question, QuestionId, ResponseMap, Theme, ThemeId};
pub use import::{ResponseImportError, ResponseImporter};
pub use navigator::{NavigationError, NavigatorState, SurveyNavigator};
pub use scoring::{
    score, OverallResult, RatingLabel, ScoringEngine, ScoringPolicy, ThemeScore, THEME_MAX_SCORE,
};
