use crate::infra::load_catalog;
use chrono::Utc;
use clap::Args;
use mastering_money::config::AppConfig;
use mastering_money::delivery::ReportClient;
use mastering_money::error::AppError;
use mastering_money::reasons::{ReasonAnswer, ReasonCatalog, ReasonId, ToggleOutcome};
use mastering_money::report::{render_text, ReportBundle, ReportDocument};
use mastering_money::survey::{score, NavigatorState, ResponseImporter, SurveyCatalog};
use mastering_money::{SessionError, SurveySession};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export with a `question_id,value` header
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Survey catalog JSON (defaults to SURVEY_CATALOG_PATH or the built-in survey)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the report bundle as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LintArgs {
    /// Survey catalog JSON (defaults to SURVEY_CATALOG_PATH or the built-in survey)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Send the finished report to this address
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Report delivery endpoint (defaults to REPORT_ENDPOINT)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

fn resolve_catalog(flag: Option<PathBuf>) -> Result<SurveyCatalog, AppError> {
    let path = match flag {
        Some(path) => Some(path),
        None => AppConfig::load()?.survey.catalog_path,
    };
    load_catalog(path.as_deref())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses,
        catalog,
        json,
    } = args;

    let catalog = resolve_catalog(catalog)?;
    let responses = ResponseImporter::from_path(&responses, &catalog)?;
    let result = score(&responses, catalog.themes());
    let bundle = ReportBundle::assemble(result, &responses, &catalog, None);

    if json {
        match serde_json::to_string_pretty(&bundle) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report bundle unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Scored {} answers across {} themes",
        responses.len(),
        catalog.themes().len()
    );
    let document = ReportDocument::from_bundle(&bundle, Utc::now());
    print!("{}", render_text(&document));
    Ok(())
}

pub(crate) fn run_lint(args: LintArgs) -> Result<(), AppError> {
    let catalog = resolve_catalog(args.catalog)?;
    let lints = catalog.lint();

    println!(
        "Survey catalog: {} themes, {} questions",
        catalog.themes().len(),
        catalog.question_count()
    );
    if lints.is_empty() {
        println!("No issues found");
    } else {
        println!("{} issue(s):", lints.len());
        for lint in lints {
            println!("- {lint}");
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { email, endpoint } = args;

    let mut session = SurveySession::start(
        Arc::new(SurveyCatalog::standard()?),
        Arc::new(ReasonCatalog::standard()),
    )?;

    println!("Mastering Money demo");
    while session.result().is_none() {
        if let Some(theme) = session.theme_intro() {
            println!("\n== {} ==\n{}", theme.theme_name, theme.description);
        }
        session.dismiss_intro();

        let Some(question) = session.current_question() else {
            break;
        };
        // Middle option: a plausible, unremarkable respondent.
        let index = question.options.len() / 2;
        let progress = session
            .progress()
            .map(|(position, total)| format!("[{position}/{total}] "))
            .unwrap_or_default();
        if let Some(option) = question.options.get(index) {
            println!(
                "{progress}{} -> {} ({} pts)",
                question.text, option.label, option.value
            );
        }

        if session.answer(index)? == NavigatorState::Completed {
            break;
        }
    }

    if let Some(result) = session.result() {
        println!(
            "\nOverall {}% | {}",
            result.overall_percent, result.rating_for_report
        );
    }

    if let Some(rating) = session.rating_mut() {
        for (reason, answer) in [
            ("r3", ReasonAnswer::Yes),
            ("r11", ReasonAnswer::Somewhat),
            ("r19", ReasonAnswer::Yes),
            ("r23", ReasonAnswer::No),
        ] {
            rating
                .rate(&ReasonId::from(reason), answer)
                .map_err(SessionError::from)?;
        }
        while rating.next_page() {}
        if let Some(custom) = rating.add_custom() {
            rating
                .edit_custom(&custom, "Family expenses always come first")
                .map_err(SessionError::from)?;
            rating
                .rate(&custom, ReasonAnswer::Yes)
                .map_err(SessionError::from)?;
        }
    }
    session.continue_to_ranking()?;

    if let Some(ranking) = session.ranking_mut() {
        for reason in ["r19", "c1", "r3", "r11"] {
            match ranking.toggle(&ReasonId::from(reason)) {
                ToggleOutcome::Selected { rank } => println!("Ranked #{rank}: {reason}"),
                ToggleOutcome::LimitReached => println!("Skipped {reason}: top three already chosen"),
                ToggleOutcome::Deselected | ToggleOutcome::Ignored => {}
            }
        }
    }
    session.finish_reflection()?;

    let bundle = session.bundle()?;
    let document = ReportDocument::from_bundle(&bundle, Utc::now());
    println!();
    print!("{}", render_text(&document));

    let Some(email) = email else {
        return Ok(());
    };

    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => AppConfig::load()?.survey.report_endpoint,
    };
    let client = match ReportClient::new(endpoint) {
        Ok(client) => client,
        Err(err) => {
            println!("  Report client unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nSending report to {email} via {}", client.endpoint());
    let status = client.deliver(&email, &bundle, session.responses()).await;
    println!("  {}", status.message());

    Ok(())
}
