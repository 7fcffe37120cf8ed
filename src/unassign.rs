//! `/unassign` comment command: an assignee removes themself from an issue,
//! once per issue.

use std::sync::OnceLock;

use anyhow::{Context as _, Result};
use log::{error, info};
use regex::Regex;

use crate::context::Context;
use crate::event::IssueCommentEvent;
use crate::github::{IssueState, IssueTracker};
use crate::guard::{Check, Outcome, Skip, first_skip};
use crate::marker::Marker;

pub fn has_command(body: &str) -> bool {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = COMMAND_REGEX
        .get_or_init(|| Regex::new(r"(?i)(?:^|\s)/unassign\b").expect("unassign command regex"));

    re.is_match(body)
}

pub fn format_body(login: &str) -> String {
    Marker::unassign(login).stamp(&format!(
        "👋 @{login}, you have been unassigned from this issue. Thanks for letting us know! \
         The issue is open for someone else to pick up."
    ))
}

fn not_created(event: &IssueCommentEvent) -> Option<Skip> {
    matches!(event.action.as_deref(), Some(action) if action != "created")
        .then_some(Skip::NotCreated)
}

fn no_issue(event: &IssueCommentEvent) -> Option<Skip> {
    match &event.issue {
        None => Some(Skip::NoIssue),
        Some(issue) if issue.is_pull_request() => Some(Skip::IsPullRequest),
        Some(_) => None,
    }
}

fn bad_comment(event: &IssueCommentEvent) -> Option<Skip> {
    let Some(comment) = &event.comment else {
        return Some(Skip::NoCommentBody);
    };

    if comment.body.as_deref().is_none_or(str::is_empty) {
        return Some(Skip::NoCommentBody);
    }

    match &comment.user {
        Some(user) if !user.is_bot() => None,
        _ => Some(Skip::BotAuthor),
    }
}

fn not_open(event: &IssueCommentEvent) -> Option<Skip> {
    let issue = event.issue.as_ref()?;
    (issue.state != IssueState::Open).then_some(Skip::NotOpen)
}

fn no_command(event: &IssueCommentEvent) -> Option<Skip> {
    let body = event.comment.as_ref()?.body.as_deref()?;
    (!has_command(body)).then_some(Skip::NoCommand)
}

fn not_assignee(event: &IssueCommentEvent) -> Option<Skip> {
    let issue = event.issue.as_ref()?;
    let login = &event.comment.as_ref()?.user.as_ref()?.login;
    (!issue.is_assigned_to(login)).then_some(Skip::NotAssignee)
}

const CHECKS: &[Check<IssueCommentEvent>] = &[
    not_created,
    no_issue,
    bad_comment,
    not_open,
    no_command,
    not_assignee,
];

pub async fn run(
    ctx: &Context,
    github: &dyn IssueTracker,
    event: &IssueCommentEvent,
) -> Result<Outcome> {
    if let Some(skip) = first_skip(event, CHECKS) {
        info!("Skipping unassign: {}", skip);
        return Ok(Outcome::Skipped(skip));
    }

    let number = event.issue.as_ref().context("Event has no issue")?.number;
    let login = event
        .comment
        .as_ref()
        .and_then(|c| c.user.as_ref())
        .map(|u| u.login.clone())
        .context("Comment has no author")?;

    unassign(ctx, github, number, &login).await.inspect_err(|e| {
        error!(
            "Unassign failed for @{} on issue #{} in {}: {:#}",
            login,
            number,
            ctx.full_name(),
            e
        )
    })
}

async fn unassign(
    ctx: &Context,
    github: &dyn IssueTracker,
    number: u64,
    login: &str,
) -> Result<Outcome> {
    let comments = github.list_comments(&ctx.owner, &ctx.repo, number).await?;

    if Marker::unassign(login).find_in(&comments) {
        info!(
            "@{} already unassigned themself from issue #{}",
            login, number
        );
        return Ok(Outcome::Skipped(Skip::AlreadyCommented));
    }

    let body = format_body(login);

    if ctx.dry_run {
        info!(
            "[dry run] Would remove @{} from issue #{} and comment:\n{}",
            login, number, body
        );
        return Ok(Outcome::DryRun);
    }

    github
        .remove_assignee(&ctx.owner, &ctx.repo, number, login)
        .await?;
    github
        .create_comment(&ctx.owner, &ctx.repo, number, &body)
        .await?;
    info!("Unassigned @{} from issue #{}", login, number);

    Ok(Outcome::Unassigned)
}
