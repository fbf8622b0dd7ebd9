use bs_core::Result;
use scraper::Html;
use crate::fetcher::PageSource;
use crate::markup::{element_text, SiteMarkup};

pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Body text of an article detail page.
///
/// Paragraphs and h2/h3 headings inside the content container are trimmed,
/// blank ones dropped, and the rest joined with a blank line. Returns `None`
/// when the page has no content container at all.
pub fn extract_body(html: &str, markup: &SiteMarkup) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&markup.content_container).next()?;

    let blocks: Vec<String> = container
        .select(&markup.content_blocks)
        .map(|block| element_text(&block))
        .collect();
    Some(join_blocks(blocks))
}

pub fn join_blocks<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks
        .into_iter()
        .filter_map(|b| {
            let trimmed = b.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Fetch an article page and extract its body.
pub async fn extract_content(
    source: &dyn PageSource,
    markup: &SiteMarkup,
    article_url: &str,
) -> Result<Option<String>> {
    let html = source.fetch(article_url).await?;
    Ok(extract_body(&html, markup))
}

/// First `max_chars` characters of `content`, for display only.
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}
