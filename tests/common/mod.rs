#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use issue_bot::github::{Comment, IssueTracker, PullRequest, User};

/// In-memory GitHub: comment threads keyed by issue number, with every
/// mutation recorded.
#[derive(Default)]
pub struct FakeTracker {
    pub pulls: Mutex<HashMap<u64, PullRequest>>,
    pub threads: Mutex<HashMap<u64, Vec<Comment>>>,
    pub removed: Mutex<Vec<(u64, String)>>,
    pub fail_comments: bool,
    pub fail_create: bool,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        FakeTracker {
            fail_comments: true,
            ..Self::default()
        }
    }

    pub fn failing_create() -> Self {
        FakeTracker {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn with_pull(self, pr: PullRequest) -> Self {
        self.pulls.lock().unwrap().insert(pr.number, pr);
        self
    }

    pub fn with_comment(self, number: u64, login: &str, body: &str) -> Self {
        self.threads
            .lock()
            .unwrap()
            .entry(number)
            .or_default()
            .push(Comment {
                body: Some(body.to_string()),
                user: Some(User::new(login)),
            });
        self
    }

    pub fn comments(&self, number: u64) -> Vec<Comment> {
        self.threads
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn removed(&self) -> Vec<(u64, String)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn get_pull_request(&self, _owner: &str, _repo: &str, number: u64) -> Result<PullRequest> {
        self.pulls
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| anyhow!("pull request #{} not found", number))
    }

    async fn list_comments(&self, _owner: &str, _repo: &str, number: u64) -> Result<Vec<Comment>> {
        if self.fail_comments {
            bail!("502 Bad Gateway");
        }
        Ok(self.comments(number))
    }

    async fn create_comment(&self, _owner: &str, _repo: &str, number: u64, body: &str) -> Result<()> {
        if self.fail_create {
            bail!("403 Resource not accessible by integration");
        }
        self.threads
            .lock()
            .unwrap()
            .entry(number)
            .or_default()
            .push(Comment {
                body: Some(body.to_string()),
                user: Some(User::bot("github-actions[bot]")),
            });
        Ok(())
    }

    async fn remove_assignee(&self, _owner: &str, _repo: &str, number: u64, login: &str) -> Result<()> {
        self.removed
            .lock()
            .unwrap()
            .push((number, login.to_string()));
        Ok(())
    }
}
