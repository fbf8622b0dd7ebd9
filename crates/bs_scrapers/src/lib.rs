pub mod cli;
pub mod config;
pub mod content;
pub mod fetcher;
pub mod ingest;
pub mod listing;
pub mod logging;
pub mod markup;
pub mod pagination;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use config::ScraperConfig;
pub use fetcher::{HttpFetcher, PageSource};
pub use ingest::{ArticleOutcome, IngestReport, Ingestor};
pub use markup::SiteMarkup;
