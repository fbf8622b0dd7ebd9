use bs_core::{Error, LastPage, Result};
use scraper::Html;
use crate::fetcher::PageSource;
use crate::markup::{element_text, SiteMarkup};

/// Highest page number among the pagination links of a listing page.
///
/// Only labels made entirely of ASCII digits count; "Next", "»" and the
/// ellipsis are ignored. Returns `None` when no numeric label exists.
pub fn last_page_number(html: &str, markup: &SiteMarkup) -> Option<u32> {
    let document = Html::parse_document(html);
    document
        .select(&markup.pagination_link)
        .filter_map(|link| parse_page_label(&element_text(&link)))
        .max()
}

fn parse_page_label(label: &str) -> Option<u32> {
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}

pub fn page_url(base_url: &str, number: u32) -> String {
    format!("{}/page/{}/", base_url.trim_end_matches('/'), number)
}

/// Fetch the blog index and work out which listing page is the last one.
pub async fn resolve_last_page(
    source: &dyn PageSource,
    markup: &SiteMarkup,
    base_url: &str,
) -> Result<LastPage> {
    let html = source.fetch(base_url).await?;
    let number = last_page_number(&html, markup).ok_or_else(|| Error::NoPagination {
        url: base_url.to_string(),
    })?;

    Ok(LastPage {
        number,
        url: page_url(base_url, number),
    })
}
