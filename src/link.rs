//! Reminds pull request authors to link the issue their change resolves.

use std::sync::OnceLock;

use anyhow::{Context as _, Result, bail};
use log::{error, info};
use regex::Regex;

use crate::context::Context;
use crate::event::PullRequestEvent;
use crate::github::{IssueState, IssueTracker, PullRequest};
use crate::guard::{Check, Outcome, Skip, first_skip};
use crate::marker::Marker;

const LINKING_DOCS: &str = "https://docs.github.com/en/issues/tracking-your-work-with-issues/using-issues/linking-a-pull-request-to-an-issue";

/// `Fixes #12`, `closes: #3 #4`, `Resolves #1, #2`
pub fn links_issue(body: &str) -> bool {
    static CLOSING_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = CLOSING_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\b(?:fixes|closes|resolves)\s*:?\s*#\d+(?:[\s,]+#\d+)*")
            .expect("closing keyword regex")
    });

    re.is_match(body)
}

pub fn format_body(ctx: &Context, author: &str) -> String {
    let message = format!(
        r#"Hi @{author}, thanks for the pull request! 👋

This pull request does not reference an issue. Every change should be tied to an issue so reviewers can follow the motivation and the issue gets closed when this is merged.

Please edit the description and add a line like:

```
Fixes #123
```

`Closes #123` and `Resolves #123` work as well.

- [Linking a pull request to an issue]({LINKING_DOCS})
- [Contributing guide](https://github.com/{owner}/{repo}/blob/main/CONTRIBUTING.md)
"#,
        owner = ctx.owner,
        repo = ctx.repo,
    );

    Marker::missing_issue().stamp(&message)
}

fn bot_author(pr: &PullRequest) -> Option<Skip> {
    pr.user
        .as_ref()
        .is_some_and(|u| u.is_bot())
        .then_some(Skip::BotAuthor)
}

fn closed(pr: &PullRequest) -> Option<Skip> {
    (pr.state == IssueState::Closed).then_some(Skip::NotOpen)
}

fn linked(pr: &PullRequest) -> Option<Skip> {
    pr.body
        .as_deref()
        .is_some_and(links_issue)
        .then_some(Skip::IssueLinked)
}

const CHECKS: &[Check<PullRequest>] = &[bot_author, closed, linked];

/// The payload's pull request, or the one named by `PR_NUMBER` on a manual run.
pub async fn resolve_pull_request(
    ctx: &Context,
    github: &dyn IssueTracker,
    event: PullRequestEvent,
    pr_number: Option<u64>,
) -> Result<PullRequest> {
    if let Some(pr) = event.pull_request {
        return Ok(pr);
    }

    match pr_number {
        Some(number) => github.get_pull_request(&ctx.owner, &ctx.repo, number).await,
        None => bail!("Event has no pull request and PR_NUMBER is not set"),
    }
}

pub async fn run(
    ctx: &Context,
    github: &dyn IssueTracker,
    event: PullRequestEvent,
    pr_number: Option<u64>,
) -> Result<Outcome> {
    let pr = resolve_pull_request(ctx, github, event, pr_number)
        .await
        .inspect_err(|e| {
            error!(
                "Failed to resolve pull request {:?} in {}: {:#}",
                pr_number,
                ctx.full_name(),
                e
            )
        })?;

    notify(ctx, github, &pr).await.inspect_err(|e| {
        error!(
            "Missing issue check failed for PR #{} in {}: {:#}",
            pr.number,
            ctx.full_name(),
            e
        )
    })
}

pub async fn notify(ctx: &Context, github: &dyn IssueTracker, pr: &PullRequest) -> Result<Outcome> {
    if let Some(skip) = first_skip(pr, CHECKS) {
        info!("Skipping PR #{}: {}", pr.number, skip);
        return Ok(Outcome::Skipped(skip));
    }

    let comments = github.list_comments(&ctx.owner, &ctx.repo, pr.number).await?;

    if Marker::missing_issue().find_in(&comments) {
        info!("Skipping PR #{}: {}", pr.number, Skip::AlreadyCommented);
        return Ok(Outcome::Skipped(Skip::AlreadyCommented));
    }

    let author = pr
        .user
        .as_ref()
        .map(|u| u.login.as_str())
        .context("Pull request has no author")?;
    let body = format_body(ctx, author);

    if ctx.dry_run {
        info!("[dry run] Would comment on PR #{}:\n{}", pr.number, body);
        return Ok(Outcome::DryRun);
    }

    github
        .create_comment(&ctx.owner, &ctx.repo, pr.number, &body)
        .await?;
    info!("Posted missing issue reminder on PR #{}", pr.number);

    Ok(Outcome::Commented)
}
