use feed_rs::model::{Entry, Link};
use feed_rs::parser;

/// One entry of a parsed feed.
///
/// Every field is optional and defaulted by the consumer on its own: feeds in
/// the wild drop titles, links and summaries independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Summary HTML, falling back to the full content body.
    pub summary: Option<String>,
    /// URL of the first `media:content` (or enclosure) element.
    pub media_content: Option<String>,
    /// URL of the first `media:thumbnail` element.
    pub media_thumbnail: Option<String>,
}

/// A syndication document reduced to the entries the bot cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub entries: Vec<FeedEntry>,
}

/// Parses RSS, Atom or JSON Feed bytes.
pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;
    let entries = feed.entries.into_iter().map(into_entry).collect();
    Ok(ParsedFeed { entries })
}

fn into_entry(entry: Entry) -> FeedEntry {
    let title = entry.title.map(|t| t.content);
    let link = article_link(&entry.links);
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    let media_content = entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .find_map(|c| c.url.as_ref().map(|u| u.to_string()));
    let media_thumbnail = entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .map(|t| t.image.uri.clone())
        .next();

    FeedEntry {
        title,
        link,
        summary,
        media_content,
        media_thumbnail,
    }
}

/// The entry's own page: an `alternate` link or one without `rel`, else the
/// first link of any kind.
fn article_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}
