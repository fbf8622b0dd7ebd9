use bs_core::{Error, Result};
use std::time::Duration;
use url::Url;

pub const BLOGS_URL: &str = "https://beyondchats.com/blogs/";
pub const SOURCE_NAME: &str = "beyondchats";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_LIMIT: usize = 5;

/// Everything the scraper needs to know about the site it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Blog index; pagination pages hang off it as `{base_url}/page/{n}/`.
    pub base_url: String,
    /// Literal stored in every article's `source` field.
    pub source: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// How many article cards of the last page are considered.
    pub limit: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: BLOGS_URL.to_string(),
            source: SOURCE_NAME.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        parse_url(&self.base_url)?;
        if self.limit == 0 {
            return Err(Error::Scraping("Article limit must be at least 1".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Scraping("Request timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
}
