use super::bundle::{ReportBundle, ThemeBreakdown};
use crate::reasons::{ReasonAnswer, ReasonsResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const REPORT_TITLE: &str = "Mastering Money Report";
pub const EMPTY_REPORT_MESSAGE: &str = "No results to display";
pub const THEMES_PER_BREAKDOWN_PAGE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBlock {
    Heading {
        text: String,
    },
    Paragraph {
        text: String,
    },
    /// `percent` is the computed score; `fill_percent` is capped at 100 for the bar.
    ScoreBar {
        label: String,
        percent: u32,
        fill_percent: u32,
    },
    Answer {
        question: String,
        answer: String,
        score: u32,
    },
    ReasonLine {
        text: String,
        answer: ReasonAnswer,
    },
    RankedReason {
        rank: usize,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub title: String,
    pub blocks: Vec<ReportBlock>,
}

/// Paginated, renderer-neutral layout of a [`ReportBundle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn from_bundle(bundle: &ReportBundle, generated_at: DateTime<Utc>) -> Self {
        if !bundle.has_results() {
            return Self {
                generated_at,
                pages: vec![ReportPage {
                    title: REPORT_TITLE.to_string(),
                    blocks: vec![ReportBlock::Paragraph {
                        text: EMPTY_REPORT_MESSAGE.to_string(),
                    }],
                }],
            };
        }

        let mut pages = vec![summary_page(bundle, generated_at)];

        let chunks: Vec<&[ThemeBreakdown]> =
            bundle.breakdown.chunks(THEMES_PER_BREAKDOWN_PAGE).collect();
        let chunk_count = chunks.len();
        for (idx, chunk) in chunks.into_iter().enumerate() {
            pages.push(breakdown_page(chunk, idx + 1, chunk_count));
        }

        if let Some(page) = bundle.reasons.as_ref().and_then(reasons_page) {
            pages.push(page);
        }

        Self {
            generated_at,
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

fn summary_page(bundle: &ReportBundle, generated_at: DateTime<Utc>) -> ReportPage {
    let result = &bundle.result;
    let mut blocks = vec![
        ReportBlock::Paragraph {
            text: format!("Generated {}", generated_at.format("%d %B %Y")),
        },
        ReportBlock::Heading {
            text: format!("Overall score: {}%", result.overall_percent),
        },
        ReportBlock::Paragraph {
            text: result.rating_for_report.label().to_string(),
        },
    ];

    blocks.extend(result.themes.iter().map(|theme| ReportBlock::ScoreBar {
        label: theme.theme_name.clone(),
        percent: theme.percent,
        fill_percent: theme.display_percent(),
    }));

    ReportPage {
        title: REPORT_TITLE.to_string(),
        blocks,
    }
}

fn breakdown_page(themes: &[ThemeBreakdown], number: usize, count: usize) -> ReportPage {
    let title = if count > 1 {
        format!("Score Breakdown ({number}/{count})")
    } else {
        "Score Breakdown".to_string()
    };

    let mut blocks = Vec::new();
    for theme in themes {
        blocks.push(ReportBlock::Heading {
            text: format!("{} ({}%)", theme.theme_name, theme.percent),
        });
        blocks.extend(theme.questions.iter().map(|question| ReportBlock::Answer {
            question: question.text.clone(),
            answer: question.selected_label.clone(),
            score: question.score,
        }));
    }

    ReportPage { title, blocks }
}

fn reasons_page(reasons: &ReasonsResult) -> Option<ReportPage> {
    let mut blocks = Vec::new();

    let answered: Vec<ReportBlock> = reasons
        .answered()
        .map(|response| ReportBlock::ReasonLine {
            text: response.text.clone(),
            answer: response.answer,
        })
        .collect();
    if !answered.is_empty() {
        blocks.push(ReportBlock::Heading {
            text: "Your Reasons".to_string(),
        });
        blocks.extend(answered);
    }

    if !reasons.top_three.is_empty() {
        blocks.push(ReportBlock::Heading {
            text: "Your Top Barriers".to_string(),
        });
        blocks.extend(
            reasons
                .top_three
                .iter()
                .enumerate()
                .map(|(idx, reason)| ReportBlock::RankedReason {
                    rank: idx + 1,
                    text: reason.text.clone(),
                }),
        );
    }

    if blocks.is_empty() {
        None
    } else {
        Some(ReportPage {
            title: "Reasons & Barriers".to_string(),
            blocks,
        })
    }
}
