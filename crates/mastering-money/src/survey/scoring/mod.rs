mod rating;

pub use rating::{RatingLabel, UnknownRatingLabel};

use super::domain::{ResponseMap, Theme, ThemeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Score ceiling every theme contributes, regardless of how many questions it holds.
pub const THEME_MAX_SCORE: u32 = 8;

/// Scoring weights. Themes of different sizes are normalized onto the same ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub theme_max_score: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            theme_max_score: THEME_MAX_SCORE,
        }
    }
}

/// Stateless engine applying a [`ScoringPolicy`] to a response set.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn score(&self, responses: &ResponseMap, themes: &[Theme]) -> OverallResult {
        let themes: Vec<ThemeScore> = themes
            .iter()
            .map(|theme| self.score_theme(responses, theme))
            .collect();

        let overall_total = themes
            .iter()
            .fold(0u64, |sum, theme| sum.saturating_add(theme.total));
        let overall_max = themes
            .iter()
            .fold(0u64, |sum, theme| sum.saturating_add(u64::from(theme.max)));
        let overall_percent = rounded_percent(overall_total, overall_max);

        debug!(
            themes = themes.len(),
            answered = responses.len(),
            overall_percent,
            "survey scored"
        );

        OverallResult {
            themes,
            overall_percent,
            rating_for_report: RatingLabel::for_percent(overall_percent),
        }
    }

    fn score_theme(&self, responses: &ResponseMap, theme: &Theme) -> ThemeScore {
        let total = theme
            .questions
            .iter()
            .filter_map(|question| responses.get(&question.id))
            .map(u64::from)
            .fold(0u64, u64::saturating_add);
        let max = self.policy.theme_max_score;

        ThemeScore {
            theme_id: theme.theme_id.clone(),
            theme_name: theme.theme_name.clone(),
            total,
            max,
            percent: rounded_percent(total, u64::from(max)),
        }
    }
}

/// Scores with the default policy.
pub fn score(responses: &ResponseMap, themes: &[Theme]) -> OverallResult {
    ScoringEngine::default().score(responses, themes)
}

/// `round(total / max * 100)` rounding halves up; a zero `max` yields 0.
pub(crate) fn rounded_percent(total: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    let percent = total
        .saturating_mul(200)
        .saturating_add(max)
        / max.saturating_mul(2);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

/// Per-theme score. `percent` is not clamped; values above 100 are kept as computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeScore {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub total: u64,
    pub max: u32,
    pub percent: u32,
}

impl ThemeScore {
    /// Percentage for bar widths, capped at 100.
    pub fn display_percent(&self) -> u32 {
        self.percent.min(100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub themes: Vec<ThemeScore>,
    pub overall_percent: u32,
    pub rating_for_report: RatingLabel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::domain::{AnswerOption, NextStep, Question, QuestionId};

    fn theme(id: &str, question_ids: &[&str], values: &[u32]) -> Theme {
        Theme {
            theme_id: ThemeId::from(id),
            theme_name: format!("Theme {id}"),
            description: String::new(),
            questions: question_ids
                .iter()
                .map(|qid| Question {
                    id: QuestionId::from(*qid),
                    text: format!("Question {qid}"),
                    options: values
                        .iter()
                        .map(|value| AnswerOption {
                            label: format!("{value} points"),
                            value: *value,
                            next: NextStep::End,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn responses(pairs: &[(&str, u32)]) -> ResponseMap {
        pairs
            .iter()
            .map(|(id, value)| (QuestionId::from(*id), *value))
            .collect()
    }

    #[test]
    fn empty_responses_score_zero_everywhere() {
        let themes = vec![
            theme("1", &["1.1", "1.2"], &[0, 4]),
            theme("2", &["2.1"], &[0, 8]),
        ];

        let result = score(&ResponseMap::new(), &themes);

        assert!(result.themes.iter().all(|t| t.total == 0 && t.percent == 0));
        assert_eq!(result.overall_percent, 0);
        assert_eq!(result.rating_for_report, RatingLabel::FailingWithMoney);
    }

    #[test]
    fn empty_catalog_and_empty_theme_are_well_formed() {
        let result = score(&responses(&[("1.1", 4)]), &[]);
        assert!(result.themes.is_empty());
        assert_eq!(result.overall_percent, 0);

        let result = score(&ResponseMap::new(), &[theme("1", &[], &[])]);
        assert_eq!(result.themes.len(), 1);
        assert_eq!(result.themes[0].max, THEME_MAX_SCORE);
        assert_eq!(result.themes[0].percent, 0);
    }

    #[test]
    fn zero_max_policy_guards_division() {
        let engine = ScoringEngine::new(ScoringPolicy { theme_max_score: 0 });
        let result = engine.score(&responses(&[("1.1", 4)]), &[theme("1", &["1.1"], &[4])]);
        assert_eq!(result.themes[0].percent, 0);
        assert_eq!(result.overall_percent, 0);
    }

    #[test]
    fn maximum_answers_reach_one_hundred() {
        let themes = vec![
            theme("1", &["1.1", "1.2"], &[0, 4]),
            theme("2", &["2.1", "2.2", "2.3", "2.4"], &[0, 2]),
        ];
        let answers = responses(&[
            ("1.1", 4),
            ("1.2", 4),
            ("2.1", 2),
            ("2.2", 2),
            ("2.3", 2),
            ("2.4", 2),
        ]);

        let result = score(&answers, &themes);

        assert!(result.themes.iter().all(|t| t.percent == 100));
        assert_eq!(result.overall_percent, 100);
        assert_eq!(result.rating_for_report, RatingLabel::MoneyMaster);
    }

    #[test]
    fn theme_percent_is_not_clamped() {
        let themes = vec![theme("1", &["1.1", "1.2", "1.3"], &[0, 4])];
        let answers = responses(&[("1.1", 4), ("1.2", 4), ("1.3", 4)]);

        let result = score(&answers, &themes);

        assert_eq!(result.themes[0].total, 12);
        assert_eq!(result.themes[0].percent, 150);
        assert_eq!(result.themes[0].display_percent(), 100);
        assert_eq!(result.overall_percent, 150);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_percent(1, 8), 13); // 12.5
        assert_eq!(rounded_percent(3, 8), 38); // 37.5
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(0, 0), 0);
    }

    #[test]
    fn huge_answer_values_do_not_overflow_totals() {
        let catalog = crate::survey::SurveyCatalog::standard().expect("standard catalog");
        let result = score(
            &responses(&[("1.1", u32::MAX), ("1.2", 1)]),
            catalog.themes(),
        );

        assert_eq!(result.themes[0].total, u64::from(u32::MAX) + 1);
        assert_eq!(result.themes.len(), catalog.themes().len());
        assert!(result.themes[0].percent > 100);
        assert_eq!(result.themes[0].display_percent(), 100);
        assert!(result.overall_percent > 100);
        assert_eq!(result.rating_for_report, RatingLabel::MoneyMaster);
    }

    #[test]
    fn unknown_response_ids_are_ignored() {
        let themes = vec![theme("1", &["1.1"], &[0, 4])];
        let result = score(&responses(&[("1.1", 4), ("9.9", 8)]), &themes);
        assert_eq!(result.themes[0].total, 4);
        assert_eq!(result.overall_percent, 50);
    }

    #[test]
    fn result_serializes_with_report_field_names() {
        let themes = vec![theme("1", &["1.1"], &[0, 4])];
        let result = score(&responses(&[("1.1", 4)]), &themes);
        let json = serde_json::to_value(&result).expect("serializes");

        assert_eq!(json["overallPercent"], 50);
        assert_eq!(json["ratingForReport"], "😕 Poor with Money");
        assert_eq!(json["themes"][0]["themeId"], "1");
        assert_eq!(json["themes"][0]["max"], 8);
    }
}
