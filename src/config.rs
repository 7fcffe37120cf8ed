use anyhow::{Context, Result, bail};

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub dry_run: bool,
}

impl Config {
    pub fn new(
        repository: &str,
        token: Option<String>,
        api_url: Option<String>,
        dry_run: Option<&str>,
    ) -> Result<Self> {
        let (owner, repo) = get_owner_repo(repository)?;

        Ok(Config {
            owner,
            repo,
            token: token.filter(|t| !t.is_empty()),
            api_url: api_url.filter(|u| !u.is_empty()),
            dry_run: dry_run.map(parse_flag).unwrap_or(false),
        })
    }

    pub fn octocrab(&self) -> Result<octocrab::Octocrab> {
        let mut builder = octocrab::Octocrab::builder();

        if let Some(token) = &self.token {
            builder = builder.personal_token(token.clone());
        }

        if let Some(uri) = &self.api_url {
            builder = builder
                .base_uri(uri.as_str())
                .with_context(|| format!("Invalid API url: {}", uri))?;
        }

        builder.build().context("Failed to build GitHub client")
    }
}

/// Splits `owner/repo` as found in `GITHUB_REPOSITORY`.
pub fn get_owner_repo(repository: &str) -> Result<(String, String)> {
    let parts = repository.trim().split('/').collect::<Vec<&str>>();

    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => bail!(
            "Repository should be in format owner/repo, got '{}'",
            repository
        ),
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
