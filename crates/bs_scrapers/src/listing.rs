use bs_core::ArticleStub;
use scraper::{ElementRef, Html};
use crate::markup::{element_text, SiteMarkup};

/// Read the article cards of a listing page.
///
/// Only the first `limit` cards in document order are looked at. A card
/// without a title heading, or whose title link is missing or blank, is
/// dropped, so the result can be shorter than `limit`.
pub fn list_articles(html: &str, markup: &SiteMarkup, limit: usize) -> Vec<ArticleStub> {
    let document = Html::parse_document(html);
    document
        .select(&markup.article_card)
        .take(limit)
        .filter_map(|card| parse_card(card, markup))
        .collect()
}

fn parse_card(card: ElementRef, markup: &SiteMarkup) -> Option<ArticleStub> {
    let heading = card.select(&markup.card_title).next()?;
    let link = heading.select(&markup.title_link).next()?;
    let url = link.value().attr("href")?.trim().to_string();
    let title = element_text(&link);
    if title.is_empty() {
        return None;
    }

    let author = card
        .select(&markup.card_author)
        .next()
        .map(|a| element_text(&a))
        .filter(|a| !a.is_empty());

    let published_date = card
        .select(&markup.card_date)
        .next()
        .and_then(|t| t.value().attr("datetime"))
        .map(str::to_string);

    Some(ArticleStub {
        title,
        url,
        author,
        published_date,
    })
}

/// Number of article cards on a listing page, before any limit is applied.
pub fn count_cards(html: &str, markup: &SiteMarkup) -> usize {
    Html::parse_document(html).select(&markup.article_card).count()
}
