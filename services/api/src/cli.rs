use crate::demo::{run_demo, run_lint, run_score, DemoArgs, LintArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mastering_money::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mastering Money",
    about = "Run the Mastering Money survey service or score responses from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a CSV of survey responses and print the report
    Score(ScoreArgs),
    /// Check a survey catalog for cycles and unreachable questions
    Lint(LintArgs),
    /// Walk a scripted session end to end and optionally send the report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Lint(args) => run_lint(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
