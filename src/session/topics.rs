use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

/// Default base for topic feeds; the slug is appended as the last segment.
pub const DEFAULT_TOPIC_FEED_BASE: &str = "https://medium.com/feed/tag";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    /// Nothing left after trimming and removing a leading `#`
    #[error("Topic is empty")]
    Empty,
}

/// One subscriber's topics, unique by exact label.
///
/// Labels keep the case and inner spacing the user typed. Two labels that
/// slugify to the same feed are still distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSet {
    topics: HashSet<String>,
}

impl TopicSet {
    /// Normalizes `raw` and inserts it, returning the stored label.
    ///
    /// Surrounding whitespace and a single leading `#` are removed. Adding a
    /// label that is already present changes nothing.
    pub fn add(&mut self, raw: &str) -> Result<String, TopicError> {
        let trimmed = raw.trim();
        let label = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
        if label.is_empty() {
            return Err(TopicError::Empty);
        }
        self.topics.insert(label.to_string());
        Ok(label.to_string())
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.topics
    }

    /// Labels in lexicographic order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.topics.iter().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

/// Lowercases a label and joins its words with hyphens.
///
/// ```
/// use readbot::session::slugify;
///
/// assert_eq!(slugify("DevOps Tools"), "devops-tools");
/// assert_eq!(slugify("  ai \t tools "), "ai-tools");
/// ```
pub fn slugify(topic: &str) -> String {
    WHITESPACE
        .replace_all(&topic.trim().to_lowercase(), "-")
        .into_owned()
}

/// Builds the single feed URL for a topic.
#[derive(Debug, Clone)]
pub struct TopicFeeds {
    base: Url,
}

#[derive(Debug, Error)]
pub enum TopicFeedBaseError {
    #[error("Invalid topic feed base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Topic feed base must be an http(s) URL with a path: {0}")]
    Unsupported(String),
}

impl TopicFeeds {
    /// Validates `base`, which must be an http(s) URL that can take path segments.
    pub fn new(base: &str) -> Result<Self, TopicFeedBaseError> {
        let base = Url::parse(base)?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(TopicFeedBaseError::Unsupported(base.to_string()));
        }
        Ok(Self { base })
    }

    /// `<base>/<slug>`, with the slug percent-encoded as one path segment.
    pub fn feed_url(&self, topic: &str) -> String {
        let slug = slugify(topic);
        let mut url = self.base.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&slug);
        }
        url.to_string()
    }
}

impl Default for TopicFeeds {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_TOPIC_FEED_BASE).expect("default topic feed base is valid"),
        }
    }
}
