use async_trait::async_trait;
use bs_core::{Article, ArticleStorage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::StorageBackend;

/// Append-only article store kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn kind() -> &'static str {
        "memory"
    }

    async fn new() -> Result<Self> {
        Ok(Self::default())
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn find_by_url(&self, url: &str) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.url == url).cloned())
    }

    async fn insert_article(&self, article: &Article) -> Result<()> {
        self.articles.write().await.push(article.clone());
        Ok(())
    }

    async fn get_by_source(&self, source: &str) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter()
            .filter(|a| a.source == source)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_core::ArticleStatus;
    use chrono::Utc;

    fn article(url: &str, source: &str) -> Article {
        Article {
            title: "Test Article".to_string(),
            url: url.to_string(),
            author: Some("Test Author".to_string()),
            content: "This is a test article about chatbots.".to_string(),
            published_date: None,
            source: source.to_string(),
            status: ArticleStatus::Original,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = InMemoryStorage::new();
        assert!(storage.is_empty().await);

        storage.insert_article(&article("http://test.com/a", "test")).await.unwrap();
        storage.insert_article(&article("http://test.com/b", "other")).await.unwrap();

        let found = storage.find_by_url("http://test.com/a").await.unwrap();
        assert_eq!(found.map(|a| a.url), Some("http://test.com/a".to_string()));
        assert!(storage.find_by_url("http://test.com/missing").await.unwrap().is_none());

        let by_source = storage.get_by_source("test").await.unwrap();
        assert_eq!(by_source.len(), 1);
        assert_eq!(storage.len().await, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();
        handle.insert_article(&article("http://test.com/a", "test")).await.unwrap();
        assert_eq!(storage.len().await, 1);
    }
}
