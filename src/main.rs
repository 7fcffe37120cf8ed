use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use issue_bot::config::Config;
use issue_bot::context::Context;
use issue_bot::event::{self, IssueCommentEvent, PullRequestEvent};
use issue_bot::github::OctocrabTracker;
use issue_bot::{link, unassign};

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Remind the author of a pull request that links no issue
    MissingIssueLink {
        /// Pull request to check when the event carries none
        #[arg(long, env = "PR_NUMBER")]
        pr_number: Option<String>,
    },
    /// Handle an `/unassign` issue comment
    Unassign,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Webhook payload written by the runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Log mutations instead of performing them. Takes `--dry-run` or
    /// `--dry-run=<true|false>`; a value must be joined with `=`.
    #[arg(long, env = "DRY_RUN", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    dry_run: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_module("issue_bot", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    debug!("{:?}", args);

    let config = Config::new(
        &args.repository,
        args.token.clone(),
        args.api_url.clone(),
        args.dry_run.as_deref(),
    )?;
    let ctx = Context::from(&config);
    let github = OctocrabTracker::new(config.octocrab()?);

    if ctx.dry_run {
        info!("Dry run: no comments or assignee changes will be made");
    }

    let outcome = match args.command {
        Command::MissingIssueLink { pr_number } => {
            let pr_number = parse_pr_number(pr_number.as_deref())?;
            let event: PullRequestEvent = event::load(&args.event_path)?;
            link::run(&ctx, &github, event, pr_number).await?
        }
        Command::Unassign => {
            let event: IssueCommentEvent = event::load(&args.event_path)?;
            unassign::run(&ctx, &github, &event).await?
        }
    };

    info!("Done: {:?}", outcome);
    Ok(())
}

fn parse_pr_number(value: Option<&str>) -> Result<Option<u64>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.trim_start_matches('#')
                .parse::<u64>()
                .with_context(|| format!("PR_NUMBER is not a number: {}", v))
        })
        .transpose()
}
