use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Look up the stored article with exactly this URL
    async fn find_by_url(&self, url: &str) -> Result<Option<Article>>;

    /// Append an article; existing documents are never touched
    async fn insert_article(&self, article: &Article) -> Result<()>;

    /// Get all articles from a specific source
    async fn get_by_source(&self, source: &str) -> Result<Vec<Article>>;
}
