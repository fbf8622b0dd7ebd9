use std::fmt;
use std::sync::Arc;
use bs_core::{Article, ArticleStorage, ArticleStub, LastPage, Result};
use crate::config::ScraperConfig;
use crate::content;
use crate::fetcher::{HttpFetcher, PageSource};
use crate::listing;
use crate::logging::Logger;
use crate::markup::SiteMarkup;
use crate::pagination;

/// What happened to one listed article during an ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleOutcome {
    Inserted(Article),
    /// A document with the same URL is already stored; nothing was fetched.
    Duplicate(ArticleStub),
    /// The detail page had no content container.
    MissingContent(ArticleStub),
}

impl ArticleOutcome {
    pub fn title(&self) -> &str {
        match self {
            ArticleOutcome::Inserted(a) => &a.title,
            ArticleOutcome::Duplicate(s) | ArticleOutcome::MissingContent(s) => &s.title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ArticleOutcome::Inserted(a) => &a.url,
            ArticleOutcome::Duplicate(s) | ArticleOutcome::MissingContent(s) => &s.url,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ArticleOutcome::Inserted(_) => "🆕",
            ArticleOutcome::Duplicate(_) => "⏭️",
            ArticleOutcome::MissingContent(_) => "🕳️",
        }
    }
}

impl fmt::Display for ArticleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.emoji(), self.title(), self.url())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub last_page: LastPage,
    /// Article cards present on the last page before the limit was applied.
    pub cards_found: usize,
    pub outcomes: Vec<ArticleOutcome>,
}

impl IngestReport {
    pub fn inserted(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::Inserted(_)))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::Duplicate(_)))
    }

    pub fn missing_content(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::MissingContent(_)))
    }

    fn count(&self, pred: impl Fn(&ArticleOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(*o)).count()
    }
}

/// Runs the last-page pipeline against an injected page source and store.
pub struct Ingestor {
    storage: Arc<dyn ArticleStorage>,
    source: Arc<dyn PageSource>,
    markup: SiteMarkup,
    config: ScraperConfig,
    logger: Logger,
}

impl Ingestor {
    pub fn new(
        storage: Arc<dyn ArticleStorage>,
        source: Arc<dyn PageSource>,
        config: ScraperConfig,
    ) -> Result<Self> {
        config.validate()?;
        let logger = Logger::new().with_prefix(format!("[{}]", config.source));
        Ok(Self {
            storage,
            source,
            markup: SiteMarkup::new()?,
            config,
            logger,
        })
    }

    /// Ingestor that fetches over HTTP with the configured user agent and timeout.
    pub fn with_http(storage: Arc<dyn ArticleStorage>, config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::new(storage, Arc::new(fetcher), config)
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Fetch the blog index and return its `<title>`, if any.
    pub async fn probe(&self) -> Result<Option<String>> {
        let html = self.source.fetch(&self.config.base_url).await?;
        let document = scraper::Html::parse_document(&html);
        let title = document
            .select(&self.markup.page_title)
            .next()
            .map(|t| crate::markup::element_text(&t));
        Ok(title)
    }

    pub async fn resolve_last_page(&self) -> Result<LastPage> {
        let last_page = pagination::resolve_last_page(
            self.source.as_ref(),
            &self.markup,
            &self.config.base_url,
        )
        .await?;
        self.logger.info(&format!("📄 Last page number: {} ({})", last_page.number, last_page.url));
        Ok(last_page)
    }

    /// Fetch a listing page and read its first `limit` article cards.
    pub async fn list_page(&self, page_url: &str) -> Result<(usize, Vec<ArticleStub>)> {
        let html = self.source.fetch(page_url).await?;
        let cards_found = listing::count_cards(&html, &self.markup);
        let stubs = listing::list_articles(&html, &self.markup, self.config.limit);

        let considered = cards_found.min(self.config.limit);
        if stubs.len() < considered {
            self.logger.debug(&format!(
                "Dropped {} article card(s) without a title on {}",
                considered - stubs.len(),
                page_url
            ));
        }
        self.logger.info(&format!("🔎 Found {} article(s) on {}", stubs.len(), page_url));
        Ok((cards_found, stubs))
    }

    pub async fn extract_content(&self, article_url: &str) -> Result<Option<String>> {
        content::extract_content(self.source.as_ref(), &self.markup, article_url).await
    }

    /// Store every new article from the first cards of the last listing page.
    ///
    /// Errors abort the run; articles inserted before the failure stay stored.
    pub async fn ingest_last_page(&self) -> Result<IngestReport> {
        let last_page = self.resolve_last_page().await?;
        let (cards_found, stubs) = self.list_page(&last_page.url).await?;

        let mut outcomes = Vec::with_capacity(stubs.len());
        for stub in stubs {
            let outcome = self.ingest_stub(stub).await?;
            outcomes.push(outcome);
        }

        let report = IngestReport {
            last_page,
            cards_found,
            outcomes,
        };
        self.logger.info(&format!(
            "✅ Inserted {} article(s), skipped {} duplicate(s), {} without content",
            report.inserted(),
            report.duplicates(),
            report.missing_content()
        ));
        Ok(report)
    }

    async fn ingest_stub(&self, stub: ArticleStub) -> Result<ArticleOutcome> {
        if self.storage.find_by_url(&stub.url).await?.is_some() {
            self.logger.info(&format!("⏭️ Already stored, skipping: {}", stub.url));
            return Ok(ArticleOutcome::Duplicate(stub));
        }

        let body = match self.extract_content(&stub.url).await? {
            Some(body) => body,
            None => {
                self.logger.warn(&format!("🕳️ No article content found, skipping: {}", stub.url));
                return Ok(ArticleOutcome::MissingContent(stub));
            }
        };

        let article = Article::from_stub(stub, body, &self.config.source);
        self.storage.insert_article(&article).await?;
        self.logger.info(&format!("💾 Stored: {}", article.title));
        Ok(ArticleOutcome::Inserted(article))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bs_core::Error;
    use bs_storage::InMemoryStorage;
    use std::collections::HashMap;

    const BASE: &str = "https://example.com/blogs/";

    struct MapSource(HashMap<String, String>);

    #[async_trait]
    impl PageSource for MapSource {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.0.get(url).cloned().ok_or_else(|| Error::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn site(article_body: Option<&str>) -> MapSource {
        let mut pages = HashMap::new();
        pages.insert(
            BASE.to_string(),
            r#"<a class="page-numbers">1</a><a class="page-numbers">2</a><a class="page-numbers next">Next</a>"#.to_string(),
        );
        pages.insert(
            format!("{}page/2/", BASE),
            r#"<article class="entry-card"><h2 class="entry-title"><a href="https://example.com/blogs/old/">Old post</a></h2></article>"#.to_string(),
        );
        if let Some(body) = article_body {
            pages.insert(
                "https://example.com/blogs/old/".to_string(),
                format!(r#"<div class="elementor-widget-theme-post-content">{}</div>"#, body),
            );
        }
        MapSource(pages)
    }

    fn ingestor(storage: &InMemoryStorage, source: MapSource) -> Ingestor {
        let config = ScraperConfig::new().with_base_url(BASE);
        Ingestor::new(Arc::new(storage.clone()), Arc::new(source), config).unwrap()
    }

    #[tokio::test]
    async fn test_ingest_inserts_new_article() {
        let storage = InMemoryStorage::new();
        let ingestor = ingestor(&storage, site(Some("<p>Hello</p><h2>World</h2>")));

        let report = ingestor.ingest_last_page().await.unwrap();
        assert_eq!(report.last_page.number, 2);
        assert_eq!(report.inserted(), 1);

        let stored = storage.find_by_url("https://example.com/blogs/old/").await.unwrap().unwrap();
        assert_eq!(stored.content, "Hello\n\nWorld");
        assert_eq!(stored.source, "beyondchats");
    }

    #[tokio::test]
    async fn test_ingest_stores_empty_container() {
        let storage = InMemoryStorage::new();
        let ingestor = ingestor(&storage, site(Some("<p>  </p>")));

        let report = ingestor.ingest_last_page().await.unwrap();
        assert_eq!(report.inserted(), 1);
        assert_eq!(report.missing_content(), 0);

        let stored = storage.find_by_url("https://example.com/blogs/old/").await.unwrap().unwrap();
        assert_eq!(stored.content, "");
    }

    #[tokio::test]
    async fn test_ingest_skips_missing_container() {
        let mut source = site(None);
        source.0.insert(
            "https://example.com/blogs/old/".to_string(),
            "<html><body><p>Sidebar only</p></body></html>".to_string(),
        );
        let storage = InMemoryStorage::new();
        let ingestor = ingestor(&storage, source);

        let report = ingestor.ingest_last_page().await.unwrap();
        assert_eq!(report.missing_content(), 1);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_ingest_propagates_fetch_errors() {
        let storage = InMemoryStorage::new();
        let ingestor = ingestor(&storage, site(None));

        let result = ingestor.ingest_last_page().await;
        assert!(matches!(result, Err(Error::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_index_title_lookup() {
        let mut pages = HashMap::new();
        pages.insert(BASE.to_string(), "<html><head><title> Blogs </title></head></html>".to_string());
        let ingestor = ingestor(&InMemoryStorage::new(), MapSource(pages));
        assert_eq!(ingestor.probe().await.unwrap().as_deref(), Some("Blogs"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScraperConfig::new().with_limit(0);
        let result = Ingestor::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(MapSource(HashMap::new())),
            config,
        );
        assert!(result.is_err());
    }
}
