use crate::config::Config;

pub struct Context {
    pub owner: String,
    pub repo: String,
    pub dry_run: bool,
}

impl Context {
    pub fn new(owner: &str, repo: &str, dry_run: bool) -> Self {
        Context {
            owner: owner.to_string(),
            repo: repo.to_string(),
            dry_run,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl From<&Config> for Context {
    fn from(config: &Config) -> Self {
        Context::new(&config.owner, &config.repo, config.dry_run)
    }
}
