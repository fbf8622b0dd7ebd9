use clap::{Args, Subcommand};
use bs_core::{ArticleStorage, Result};
use crate::content::preview;
use crate::ingest::Ingestor;

const PREVIEW_CHARS: usize = 200;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ScraperCommands {
    /// Store new articles from the last listing page
    Ingest,
    /// Print the last listing page number and URL
    LastPage,
    /// List the articles on the last listing page without storing them
    List,
    /// Fetch the blog index and print its page title
    Probe,
    /// Show articles already stored for this source
    Stored,
}

pub async fn handle_command(args: ScraperArgs, ingestor: &Ingestor, storage: &dyn ArticleStorage) -> Result<()> {
    match args.command {
        ScraperCommands::Ingest => {
            let report = ingestor.ingest_last_page().await?;
            for outcome in &report.outcomes {
                println!("{}", outcome);
            }
            println!(
                "Page {}: {} inserted, {} duplicate, {} without content",
                report.last_page.number,
                report.inserted(),
                report.duplicates(),
                report.missing_content()
            );
        }
        ScraperCommands::LastPage => {
            let last_page = ingestor.resolve_last_page().await?;
            println!("Last page number: {}", last_page.number);
            println!("Last page URL: {}", last_page.url);
        }
        ScraperCommands::List => {
            let last_page = ingestor.resolve_last_page().await?;
            let (_, stubs) = ingestor.list_page(&last_page.url).await?;
            for stub in stubs {
                println!("{}", stub.title);
                println!("  url:    {}", stub.url);
                println!("  author: {}", stub.author.as_deref().unwrap_or("-"));
                println!("  date:   {}", stub.published_date.as_deref().unwrap_or("-"));
            }
        }
        ScraperCommands::Probe => {
            match ingestor.probe().await? {
                Some(title) => println!("Page title: {}", title),
                None => println!("Page has no title"),
            }
        }
        ScraperCommands::Stored => {
            let articles = storage.get_by_source(&ingestor.config().source).await?;
            println!("{} stored article(s)", articles.len());
            for article in articles {
                println!("{} ({})", article.title, article.url);
                println!("  {}", preview(&article.content, PREVIEW_CHARS).replace('\n', " "));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScraperArgs,
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = TestCli::try_parse_from(["bs", "last-page"]).unwrap();
        assert_eq!(cli.args.command, ScraperCommands::LastPage);

        let cli = TestCli::try_parse_from(["bs", "ingest"]).unwrap();
        assert_eq!(cli.args.command, ScraperCommands::Ingest);

        assert!(TestCli::try_parse_from(["bs", "crawl"]).is_err());
    }
}
