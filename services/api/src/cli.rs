use crate::demo::{run_demo, run_pipeline_report, DemoArgs, PipelineReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talentflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talentflow",
    about = "Run and demonstrate the candidate pipeline service from the command line",
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
    /// Inspect candidate pipelines from tracker exports
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommand,
    },
    /// Run an end-to-end CLI demo covering pipeline and document workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PipelineCommand {
    /// Import a tracker CSV export and print the resulting pipeline
    Report(PipelineReportArgs),
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
        Command::Pipeline {
            command: PipelineCommand::Report(args),
        } => run_pipeline_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
