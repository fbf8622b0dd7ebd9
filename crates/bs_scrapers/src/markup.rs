//! CSS selectors for the blog theme. These are pinned to the site's current
//! markup and are the first thing to revisit when extraction comes back empty.

use bs_core::{Error, Result};
use scraper::{ElementRef, Selector};

pub const PAGINATION_LINK: &str = "a.page-numbers";
pub const ARTICLE_CARD: &str = "article.entry-card";
pub const CARD_TITLE: &str = ".entry-title";
pub const TITLE_LINK: &str = "a";
pub const CARD_AUTHOR: &str = ".meta-author a, a[rel=\"author\"]";
pub const CARD_DATE: &str = "time[datetime]";
pub const CONTENT_CONTAINER: &str = ".elementor-widget-theme-post-content";
pub const CONTENT_BLOCKS: &str = "p, h2, h3";
pub const PAGE_TITLE: &str = "title";

#[derive(Debug, Clone)]
pub struct SiteMarkup {
    pub pagination_link: Selector,
    pub article_card: Selector,
    pub card_title: Selector,
    pub title_link: Selector,
    pub card_author: Selector,
    pub card_date: Selector,
    pub content_container: Selector,
    pub content_blocks: Selector,
    pub page_title: Selector,
}

impl SiteMarkup {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pagination_link: selector(PAGINATION_LINK)?,
            article_card: selector(ARTICLE_CARD)?,
            card_title: selector(CARD_TITLE)?,
            title_link: selector(TITLE_LINK)?,
            card_author: selector(CARD_AUTHOR)?,
            card_date: selector(CARD_DATE)?,
            content_container: selector(CONTENT_CONTAINER)?,
            content_blocks: selector(CONTENT_BLOCKS)?,
            page_title: selector(PAGE_TITLE)?,
        })
    }
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector {:?}: {}", css, e)))
}

/// Visible text of an element with surrounding whitespace removed.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
