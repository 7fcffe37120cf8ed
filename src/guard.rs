//! Ordered precondition checks. The first failing check names why a handler
//! did nothing.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skip {
    NotCreated,
    NoIssue,
    IsPullRequest,
    NoCommentBody,
    BotAuthor,
    NotOpen,
    NoCommand,
    NotAssignee,
    IssueLinked,
    AlreadyCommented,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::NotCreated => "event is not a newly created comment",
            Skip::NoIssue => "payload has no issue",
            Skip::IsPullRequest => "issue is a pull request",
            Skip::NoCommentBody => "comment has no body",
            Skip::BotAuthor => "author is a bot",
            Skip::NotOpen => "not open",
            Skip::NoCommand => "no /unassign command",
            Skip::NotAssignee => "commenter is not an assignee",
            Skip::IssueLinked => "description links an issue",
            Skip::AlreadyCommented => "marker comment already present",
        };
        f.write_str(reason)
    }
}

/// What a handler ended up doing for one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Commented,
    Unassigned,
    DryRun,
    Skipped(Skip),
}

pub type Check<T> = fn(&T) -> Option<Skip>;

pub fn first_skip<T>(input: &T, checks: &[Check<T>]) -> Option<Skip> {
    checks.iter().find_map(|check| check(input))
}
