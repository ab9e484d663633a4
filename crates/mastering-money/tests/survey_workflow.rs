//! End-to-end survey scenarios through the public catalog, navigator, and scoring API.

use std::io::Cursor;
use std::sync::Arc;

use mastering_money::survey::{
    score, AnswerOption, CatalogLint, NavigatorState, NextStep, Question, QuestionId,
    RatingLabel, ResponseImporter, SurveyCatalog, SurveyNavigator, Theme, ThemeId,
};

fn two_by_two_catalog() -> SurveyCatalog {
    let question = |id: &str, next: Option<&str>| Question {
        id: QuestionId::from(id),
        text: format!("Question {id}"),
        options: [("Low", 0), ("High", 2)]
            .into_iter()
            .map(|(label, value)| AnswerOption {
                label: label.to_string(),
                value,
                next: next.map(|id| NextStep::question(id)).unwrap_or(NextStep::End),
            })
            .collect(),
    };
    let theme = |id: &str, questions: Vec<Question>| Theme {
        theme_id: ThemeId::from(id),
        theme_name: format!("Theme {id}"),
        description: String::new(),
        questions,
    };

    SurveyCatalog::new(vec![
        theme(
            "1",
            vec![question("1.1", Some("1.2")), question("1.2", Some("2.1"))],
        ),
        theme(
            "2",
            vec![question("2.1", Some("2.2")), question("2.2", None)],
        ),
    ])
    .expect("valid catalog")
}

#[test]
fn two_themes_answered_at_two_score_fifty_percent() {
    let catalog = Arc::new(two_by_two_catalog());
    let mut navigator = SurveyNavigator::start(catalog.clone()).expect("navigator");

    let mut states = Vec::new();
    while !navigator.is_complete() {
        states.push(navigator.choose(1).expect("answer accepted"));
    }

    assert_eq!(
        states,
        vec![
            NavigatorState::Active {
                question: QuestionId::from("1.2")
            },
            NavigatorState::ThemeBoundary {
                question: QuestionId::from("2.1"),
                theme: ThemeId::from("2"),
            },
            NavigatorState::Active {
                question: QuestionId::from("2.2")
            },
            NavigatorState::Completed,
        ]
    );

    let result = score(navigator.responses(), catalog.themes());
    assert_eq!(result.themes.len(), catalog.themes().len());
    assert!(result.themes.iter().all(|theme| theme.percent == 50));
    assert_eq!(result.overall_percent, 50);
    assert_eq!(result.rating_for_report, RatingLabel::PoorWithMoney);
    assert_eq!(result.rating_for_report.label(), "😕 Poor with Money");
}

#[test]
fn standard_catalog_walk_produces_one_score_per_theme() {
    let catalog = Arc::new(SurveyCatalog::standard().expect("standard catalog"));
    let mut navigator = SurveyNavigator::start(catalog.clone()).expect("navigator");

    let mut answered = 0;
    while !navigator.is_complete() {
        navigator.choose(0).expect("first option always valid");
        answered += 1;
    }

    // Answering "Yes" to debt routes through the repayment question.
    assert_eq!(answered, catalog.question_count());
    let result = score(navigator.responses(), catalog.themes());
    assert_eq!(result.themes.len(), 6);
    assert_eq!(result.overall_percent, 0);
    assert_eq!(result.rating_for_report, RatingLabel::FailingWithMoney);
    assert!(catalog.lint().is_empty());
}

#[test]
fn dangling_next_is_rejected_at_load() {
    let json = r#"[
        {
            "themeId": "1",
            "themeName": "Spending",
            "questions": [
                {
                    "id": "1.1",
                    "text": "Budget?",
                    "options": [{ "label": "Yes", "value": 4, "next": "9.9" }]
                }
            ]
        }
    ]"#;

    let err = SurveyCatalog::from_reader(Cursor::new(json)).expect_err("dangling next");
    assert!(err.to_string().contains("9.9"));
}

#[test]
fn catalog_json_accepts_null_and_end_sentinels() {
    let json = r#"[
        {
            "themeId": "1",
            "themeName": "Spending",
            "description": "Day to day",
            "questions": [
                {
                    "id": "1.1",
                    "text": "Budget?",
                    "options": [
                        { "label": "No", "value": 0, "next": "1.2" },
                        { "label": "Yes", "value": 4, "next": "1.2" }
                    ]
                },
                {
                    "id": "1.2",
                    "text": "Track spending?",
                    "options": [
                        { "label": "No", "value": 0, "next": null },
                        { "label": "Yes", "value": 4, "next": "End" }
                    ]
                }
            ]
        }
    ]"#;

    let catalog = Arc::new(SurveyCatalog::from_reader(Cursor::new(json)).expect("catalog"));
    let mut navigator = SurveyNavigator::start(catalog.clone()).expect("navigator");
    navigator.choose(1).expect("1.1");
    assert_eq!(navigator.choose(1).expect("1.2"), NavigatorState::Completed);

    let result = score(navigator.responses(), catalog.themes());
    assert_eq!(result.overall_percent, 100);
    assert_eq!(result.rating_for_report, RatingLabel::MoneyMaster);
}

#[test]
fn lint_reports_cycles_and_unreachable_questions() {
    let json = r#"[
        {
            "themeId": "1",
            "themeName": "Loop",
            "questions": [
                { "id": "1.1", "text": "A", "options": [{ "label": "Again", "value": 1, "next": "1.2" }] },
                { "id": "1.2", "text": "B", "options": [
                    { "label": "Back", "value": 1, "next": "1.1" },
                    { "label": "Done", "value": 1, "next": null }
                ] },
                { "id": "1.3", "text": "C", "options": [{ "label": "Done", "value": 1, "next": null }] }
            ]
        }
    ]"#;

    let catalog = SurveyCatalog::from_reader(Cursor::new(json)).expect("catalog");
    let lints = catalog.lint();

    assert!(lints.iter().any(|lint| matches!(lint, CatalogLint::Cycle { .. })));
    assert!(lints.contains(&CatalogLint::Unreachable {
        question: QuestionId::from("1.3")
    }));
    assert!(!lints
        .iter()
        .any(|lint| matches!(lint, CatalogLint::NonTerminating { .. })));
}

#[test]
fn imported_responses_score_like_live_ones() {
    let catalog = SurveyCatalog::standard().expect("standard catalog");
    let csv = "question_id,value\n1.1,4\n1.2,4\n\n2.1, 2\n2.2,2\n";

    let responses = ResponseImporter::from_reader(Cursor::new(csv), &catalog).expect("import");
    let result = score(&responses, catalog.themes());

    assert_eq!(result.themes[0].percent, 100);
    assert_eq!(result.themes[1].percent, 50);
    // 12 of 48 points.
    assert_eq!(result.overall_percent, 25);
}
