use rand::seq::{IndexedRandom, SliceRandom};

use crate::content::clean_html;
use crate::feed::fetcher::FeedFetch;
use crate::feed::image::resolve_image;
use crate::feed::parser::FeedEntry;

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";

/// A display-ready article.
///
/// `summary` is plain text of any length; truncation for captions happens at
/// render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub image: String,
}

impl Article {
    fn from_entry(entry: &FeedEntry) -> Self {
        Self {
            title: entry.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
            link: entry.link.clone().unwrap_or_default(),
            summary: clean_html(entry.summary.as_deref().unwrap_or(NO_DESCRIPTION)),
            image: resolve_image(entry),
        }
    }
}

/// Picks one article from a list of feed sources.
pub struct ArticleSelector<F> {
    fetcher: F,
}

impl<F: FeedFetch> ArticleSelector<F> {
    /// Wraps the fetcher used for every source.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns a random article from the first source that yields entries.
    ///
    /// Sources are tried one at a time in a fresh random order; the caller's
    /// slice is left untouched. Failed and empty sources are skipped. Once a
    /// source has entries no further sources are fetched. `None` means every
    /// source failed or was empty, including the case of an empty list.
    pub async fn select<S: AsRef<str>>(&self, sources: &[S]) -> Option<Article> {
        let order = shuffled(sources);

        for url in &order {
            let feed = match self.fetcher.fetch(url).await {
                Ok(feed) => feed,
                Err(_) => continue,
            };

            let Some(entry) = pick(&feed.entries) else {
                tracing::debug!(feed = %url, "Feed has no entries, trying next source");
                continue;
            };

            return Some(Article::from_entry(entry));
        }

        tracing::info!(sources = sources.len(), "No article found in any source");
        None
    }
}

fn shuffled<S: AsRef<str>>(sources: &[S]) -> Vec<String> {
    let mut order: Vec<String> = sources.iter().map(|s| s.as_ref().to_string()).collect();
    order.shuffle(&mut rand::rng());
    order
}

fn pick(entries: &[FeedEntry]) -> Option<&FeedEntry> {
    entries.choose(&mut rand::rng())
}
