use std::path::PathBuf;

use anyhow::Result;
use branch_sync::App;
use branch_sync::Config;
use branch_sync::config::DEFAULT_REMOTE;
use branch_sync::config::SweepMode;
use branch_sync::logging::setup_logging;
use branch_sync::ops::git::RealGit;
use branch_sync::ops::runner::ProcessRunner;
use clap::Parser;

#[derive(Parser)]
#[command(name = "branch-sync")]
#[command(about = "Commit and publish local work on your own branch, then pull every branch", long_about = None)]
pub struct Cli {
    /// Working copy to synchronize
    #[arg(short = 'C', long, default_value = ".")]
    pub repo: PathBuf,

    /// Remote to publish a newly created branch to
    #[arg(long, default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// How each branch is updated during the sweep
    #[arg(long, value_enum, default_value_t = SweepMode::Pull)]
    pub sweep: SweepMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    let config = Config::new(cli.remote, cli.sweep);
    let git = RealGit::new(ProcessRunner::new(cli.repo));
    let app = App::new(config, git);

    app.cmd_sync(&mut std::io::stdout()).await?;

    Ok(())
}
