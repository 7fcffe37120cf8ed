use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::github::{Comment, IssueState, PullRequest, User};

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueCommentEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub state: IssueState,
    pub user: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Present only when the issue is a pull request.
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignees
            .iter()
            .any(|a| a.login.eq_ignore_ascii_case(login))
    }
}

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event payload: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event payload: {}", path.display()))
}
