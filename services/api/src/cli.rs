use crate::demo::{
    run_batch, run_demo, run_evaluate, run_tier, BatchArgs, EvaluateArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use underwriting::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Underwriting Tier Review",
    about = "Score borrowers, check loan-type eligibility, and serve the tier review API",
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
    /// Compute the composite score, tier and lending caps for one borrower
    Tier(ScoreArgs),
    /// Run the loan-type eligibility rules and exception checks for one borrower
    Evaluate(EvaluateArgs),
    /// Review every row of a borrower CSV export
    Batch(BatchArgs),
    /// Review the seeded demo portfolio through the tiering service
    Demo,
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
        Command::Tier(args) => run_tier(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo => run_demo(),
    }
}
