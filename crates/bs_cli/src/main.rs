use clap::Parser;
use bs_core::{ArticleStorage, Result};
use bs_scrapers::cli::{handle_command, ScraperArgs, ScraperCommands};
use bs_scrapers::config::{BLOGS_URL, DEFAULT_LIMIT, USER_AGENT};
use bs_scrapers::logging::init_logging;
use bs_scrapers::{Ingestor, ScraperConfig};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| format!("Duration too large: {}", s))?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

/// Read-only lookup so a broken backend fails before any page is fetched.
async fn check_storage(storage: &Arc<dyn ArticleStorage>, storage_type: &str) -> Result<()> {
    storage.find_by_url(BLOGS_URL).await?;
    info!("🏦 Storage backend initialized successfully (using {})", storage_type);
    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Ingest the oldest blog articles into a document store", long_about = None)]
struct Cli {
    /// Storage backend: sqlite or memory (memory is lost when the process exits)
    #[arg(long, default_value = "sqlite")]
    storage: String,
    /// Backend location, e.g. the SQLite database file (default ./articles.db)
    #[arg(long)]
    backend_url: Option<String>,
    /// Blog index URL
    #[arg(long, default_value = BLOGS_URL)]
    base_url: String,
    /// Number of article cards considered on the last page
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
    /// Per-request timeout (e.g. 15s, 1m, 1m30s)
    #[arg(long, default_value = "15s")]
    timeout: HumanDuration,
    #[arg(long, default_value = USER_AGENT)]
    user_agent: String,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: ScraperCommands,
}

impl Cli {
    fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig::new()
            .with_base_url(self.base_url.as_str())
            .with_limit(self.limit)
            .with_timeout(self.timeout.0)
            .with_user_agent(self.user_agent.as_str())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let storage: Arc<dyn ArticleStorage> = bs_storage::create_storage(
        cli.storage.as_str(),
        cli.backend_url.as_deref(),
    ).await?;

    info!("💾 Checking storage connection...");
    check_storage(&storage, cli.storage.as_str()).await?;

    let config = cli.scraper_config();
    info!("🦗 Scraping {} (first {} article(s) of the last page)", config.base_url, config.limit);
    let ingestor = Ingestor::with_http(storage.clone(), config)?;

    let args = ScraperArgs { command: cli.command };
    handle_command(args, &ingestor, storage.as_ref()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("15s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(15));
        assert_eq!("15".parse::<HumanDuration>().unwrap().0, Duration::from_secs(15));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("1h 2m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(3720));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        assert!("5124095576030432h".parse::<HumanDuration>().is_err());
        assert!("307445734561825861m".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s 1s".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s 1".parse::<HumanDuration>().is_err());
        assert!("--timeout".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["bs", "ingest"]).unwrap();
        assert_eq!(cli.command, ScraperCommands::Ingest);
        assert_eq!(cli.storage, "sqlite");
        assert_eq!(cli.backend_url, None);

        let config = cli.scraper_config();
        assert_eq!(config, ScraperConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "bs",
            "--storage", "sqlite",
            "--backend-url", "/tmp/articles.db",
            "--base-url", "https://example.com/blog/",
            "--limit", "3",
            "--timeout", "30s",
            "last-page",
        ])
        .unwrap();

        assert_eq!(cli.backend_url.as_deref(), Some("/tmp/articles.db"));
        let config = cli.scraper_config();
        assert_eq!(config.base_url, "https://example.com/blog/");
        assert_eq!(config.limit, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));

        let cli = Cli::try_parse_from(["bs", "--storage", "memory", "stored"]).unwrap();
        assert_eq!(cli.storage, "memory");
        assert_eq!(cli.command, ScraperCommands::Stored);
    }

    #[test]
    fn test_cli_rejects_overflowing_timeout() {
        assert!(Cli::try_parse_from(["bs", "--timeout", "5124095576030432h", "ingest"]).is_err());
    }
}
