use super::document::{ReportBlock, ReportDocument};
use std::fmt::Write;

pub const BAR_WIDTH: usize = 20;
const RULE_WIDTH: usize = 60;

/// Plain-text rendering used for e-mail bodies and the CLI.
pub fn render_text(document: &ReportDocument) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let page_count = document.pages.len();
    let mut out = String::new();

    for (idx, page) in document.pages.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{} (page {} of {})", page.title, idx + 1, page_count);
        let _ = writeln!(out, "{rule}");

        for block in &page.blocks {
            render_block(&mut out, block);
        }
    }

    out
}

fn render_block(out: &mut String, block: &ReportBlock) {
    let _ = match block {
        ReportBlock::Heading { text } => writeln!(out, "\n{text}"),
        ReportBlock::Paragraph { text } => writeln!(out, "{text}"),
        ReportBlock::ScoreBar {
            label,
            percent,
            fill_percent,
        } => writeln!(out, "{label:<24} [{}] {percent}%", bar(*fill_percent)),
        ReportBlock::Answer {
            question,
            answer,
            score,
        } => writeln!(out, "- {question}\n    {answer} ({score} pts)"),
        ReportBlock::ReasonLine { text, answer } => writeln!(out, "- {text}: {answer}"),
        ReportBlock::RankedReason { rank, text } => writeln!(out, "{rank}. {text}"),
    };
}

/// Filled cells for a 0..=100 percentage, rounded half-up.
fn bar(fill_percent: u32) -> String {
    let fill = fill_percent.min(100) as usize;
    let filled = (fill * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::ReportPage;
    use chrono::{TimeZone, Utc};

    #[test]
    fn bars_are_twenty_cells_wide() {
        assert_eq!(bar(0), "....................");
        assert_eq!(bar(50), "##########..........");
        assert_eq!(bar(100), "####################");
        assert_eq!(bar(150), "####################");
        assert_eq!(bar(73).chars().filter(|cell| *cell == '#').count(), 15);
    }

    #[test]
    fn pages_get_ruled_headers() {
        let document = ReportDocument {
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            pages: vec![
                ReportPage {
                    title: "First".to_string(),
                    blocks: vec![ReportBlock::ScoreBar {
                        label: "Saving".to_string(),
                        percent: 50,
                        fill_percent: 50,
                    }],
                },
                ReportPage {
                    title: "Second".to_string(),
                    blocks: vec![ReportBlock::RankedReason {
                        rank: 1,
                        text: "Time".to_string(),
                    }],
                },
            ],
        };

        let text = render_text(&document);
        assert!(text.contains("First (page 1 of 2)"));
        assert!(text.contains("Second (page 2 of 2)"));
        assert!(text.contains("[##########..........] 50%"));
        assert!(text.contains("1. Time"));
        assert_eq!(text.matches(&"=".repeat(RULE_WIDTH)).count(), 4);
    }
}
