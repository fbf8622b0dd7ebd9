use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully extracted article as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub content: String,
    pub published_date: Option<String>,
    pub source: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Builds the stored document for a listed article and its extracted body.
    pub fn from_stub(stub: ArticleStub, content: String, source: &str) -> Self {
        Self {
            title: stub.title,
            url: stub.url,
            author: stub.author,
            content,
            published_date: stub.published_date,
            source: source.to_string(),
            status: ArticleStatus::Original,
            created_at: Utc::now(),
        }
    }
}

/// Metadata read from an article card on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleStub {
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Freshly scraped, never modified.
    Original,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Original => "original",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "original" => Some(ArticleStatus::Original),
            _ => None,
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The highest-numbered listing page and its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPage {
    pub number: u32,
    pub url: String,
}
