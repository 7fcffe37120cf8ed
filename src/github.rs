//! GitHub REST surface used by the handlers.
//!
//! The handlers only talk to [`IssueTracker`]; [`OctocrabTracker`] is the
//! implementation that hits the API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl User {
    pub fn new(login: &str) -> Self {
        User {
            login: login.to_string(),
            kind: "User".to_string(),
        }
    }

    pub fn bot(login: &str) -> Self {
        User {
            login: login.to_string(),
            kind: "Bot".to_string(),
        }
    }

    /// App accounts report `type: Bot`, but some payloads only carry the
    /// `[bot]` login suffix.
    pub fn is_bot(&self) -> bool {
        self.kind.eq_ignore_ascii_case("bot") || self.login.ends_with("[bot]")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub body: Option<String>,
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub body: Option<String>,
    #[serde(default)]
    pub state: IssueState,
    pub user: Option<User>,
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest>;

    /// Every comment on the issue or pull request, across all pages.
    async fn list_comments(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Comment>>;

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()>;

    async fn remove_assignee(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        login: &str,
    ) -> Result<()>;
}

pub struct OctocrabTracker {
    octocrab: Octocrab,
}

impl OctocrabTracker {
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

const PER_PAGE: u8 = 100;

#[async_trait]
impl IssueTracker for OctocrabTracker {
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest> {
        debug!("Fetching pull request {}/{}#{}", owner, repo, number);

        let pr = self
            .octocrab
            .pulls(owner, repo)
            .get(number)
            .await
            .with_context(|| format!("Failed to get pull request {}/{}#{}", owner, repo, number))?;

        Ok(convert_pull_request(&pr))
    }

    async fn list_comments(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut page_num = 1u32;

        loop {
            let page = self
                .octocrab
                .issues(owner, repo)
                .list_comments(number)
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await
                .with_context(|| {
                    format!(
                        "Failed to list comments on {}/{}#{} (page {})",
                        owner, repo, number, page_num
                    )
                })?;

            let has_next = page.next.is_some() && !page.items.is_empty();
            comments.extend(page.items.iter().map(convert_comment));

            if !has_next {
                break;
            }

            page_num += 1;
        }

        debug!(
            "Fetched {} comments for {}/{}#{}",
            comments.len(),
            owner,
            repo,
            number
        );
        Ok(comments)
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.octocrab
            .issues(owner, repo)
            .create_comment(number, body)
            .await
            .with_context(|| format!("Failed to comment on {}/{}#{}", owner, repo, number))?;

        Ok(())
    }

    async fn remove_assignee(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        login: &str,
    ) -> Result<()> {
        self.octocrab
            .issues(owner, repo)
            .remove_assignees(number, &[login])
            .await
            .with_context(|| {
                format!(
                    "Failed to remove {} from {}/{}#{}",
                    login, owner, repo, number
                )
            })?;

        Ok(())
    }
}

fn convert_author(author: &octocrab::models::Author) -> User {
    User {
        login: author.login.clone(),
        kind: author.r#type.clone(),
    }
}

fn convert_comment(comment: &octocrab::models::issues::Comment) -> Comment {
    Comment {
        body: comment.body.clone(),
        user: Some(convert_author(&comment.user)),
    }
}

fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Closed) => IssueState::Closed,
        _ => IssueState::Open,
    };

    PullRequest {
        number: pr.number,
        body: pr.body.clone(),
        state,
        user: pr.user.as_deref().map(convert_author),
    }
}
