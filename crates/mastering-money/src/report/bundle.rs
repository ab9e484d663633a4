use crate::reasons::ReasonsResult;
use crate::survey::{OverallResult, QuestionId, ResponseMap, SurveyCatalog, ThemeId};
use serde::{Deserialize, Serialize};

/// One answered question as shown in the per-theme breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub id: QuestionId,
    pub text: String,
    pub selected_label: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBreakdown {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub percent: u32,
    pub questions: Vec<AnsweredQuestion>,
}

/// Everything a report needs: scores, optional reflection, and the answered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    #[serde(flatten)]
    pub result: OverallResult,
    #[serde(default)]
    pub reasons: Option<ReasonsResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<ThemeBreakdown>,
}

impl ReportBundle {
    /// Joins a scored result with the catalog text of every answered question.
    /// Themes without any answer are left out of the breakdown.
    pub fn assemble(
        result: OverallResult,
        responses: &ResponseMap,
        catalog: &SurveyCatalog,
        reasons: Option<ReasonsResult>,
    ) -> Self {
        let breakdown = catalog
            .themes()
            .iter()
            .filter_map(|theme| {
                let questions: Vec<AnsweredQuestion> = theme
                    .questions
                    .iter()
                    .filter_map(|question| {
                        let value = responses.get(&question.id)?;
                        let selected_label = question
                            .option_for_value(value)
                            .map(|option| option.label.clone())
                            .unwrap_or_else(|| value.to_string());
                        Some(AnsweredQuestion {
                            id: question.id.clone(),
                            text: question.text.clone(),
                            selected_label,
                            score: value,
                        })
                    })
                    .collect();

                if questions.is_empty() {
                    return None;
                }

                let percent = result
                    .themes
                    .iter()
                    .find(|score| score.theme_id == theme.theme_id)
                    .map(|score| score.percent)
                    .unwrap_or(0);

                Some(ThemeBreakdown {
                    theme_id: theme.theme_id.clone(),
                    theme_name: theme.theme_name.clone(),
                    percent,
                    questions,
                })
            })
            .collect();

        Self {
            result,
            reasons,
            breakdown,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.result.themes.is_empty()
    }
}
