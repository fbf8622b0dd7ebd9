use async_trait::async_trait;
use bs_core::{Article, ArticleStatus, ArticleStorage, Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::PathBuf;
use std::sync::Arc;
use crate::StorageBackend;

// `url` is indexed, not UNIQUE; dedup is a lookup before insert.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        author TEXT,
        content TEXT NOT NULL,
        published_date TEXT,
        source TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_url ON articles (url)",
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn kind() -> &'static str {
        "sqlite"
    }

    async fn new() -> Result<Self> {
        let db_path = PathBuf::from("articles.db");
        Self::new_with_path(&db_path).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.clone(),
        })
    }

    pub fn get_db_path(&self) -> &PathBuf {
        &self.db_path
    }

    fn row_to_article(row: &SqliteRow) -> Result<Article> {
        let status: String = row.get("status");
        let created_at: String = row.get("created_at");

        Ok(Article {
            title: row.get("title"),
            url: row.get("url"),
            author: row.get::<Option<String>, _>("author"),
            content: row.get("content"),
            published_date: row.get::<Option<String>, _>("published_date"),
            source: row.get("source"),
            status: ArticleStatus::parse(&status)
                .ok_or_else(|| Error::Database(format!("Unknown article status: {}", status)))?,
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Database(format!("Failed to parse date: {}", e)))?
                .with_timezone(&chrono::Utc),
        })
    }
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn find_by_url(&self, url: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE url = ? ORDER BY id LIMIT 1")
            .bind(url)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to look up article: {}", e)))?;

        row.as_ref().map(Self::row_to_article).transpose()
    }

    async fn insert_article(&self, article: &Article) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
            (title, url, author, content, published_date, source, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&article.url)
        .bind(article.author.as_deref())
        .bind(&article.content)
        .bind(article.published_date.as_deref())
        .bind(&article.source)
        .bind(article.status.as_str())
        .bind(article.created_at.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to store article: {}", e)))?;

        Ok(())
    }

    async fn get_by_source(&self, source: &str) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM articles WHERE source = ? ORDER BY id")
            .bind(source)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to get articles by source: {}", e)))?;

        rows.iter().map(Self::row_to_article).collect()
    }
}
