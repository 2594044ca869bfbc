//! Built-in feed categories offered in the menu.

pub const DEVOPS_FEEDS: [&str; 3] = [
    "https://dev.to/feed/tag/devops",
    "https://medium.com/feed/tag/devops",
    "https://freecodecamp.org/news/tag/devops/rss",
];

pub const SETUP_FEEDS: [&str; 3] = [
    "https://medium.com/feed/tag/desk-setup",
    "https://medium.com/feed/tag/workspace",
    "https://www.reddit.com/r/Workspaces/.rss",
];

pub const GENERAL_FEEDS: [&str; 6] = [
    "https://medium.com/feed/tag/productivity",
    "https://medium.com/feed/tag/life",
    "https://medium.com/feed/tag/design",
    "https://medium.com/feed/tag/creativity",
    "https://medium.com/feed/tag/technology",
    "https://medium.com/feed/tag/self-improvement",
];

/// A fixed group of feed sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DevOps,
    Setup,
    /// General reading; also used for the daily article.
    Random,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::DevOps, Category::Setup, Category::Random];

    pub fn feeds(self) -> &'static [&'static str] {
        match self {
            Category::DevOps => &DEVOPS_FEEDS,
            Category::Setup => &SETUP_FEEDS,
            Category::Random => &GENERAL_FEEDS,
        }
    }

    /// Identifier used in button callbacks and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::DevOps => "devops",
            Category::Setup => "setup",
            Category::Random => "random",
        }
    }

    /// Inverse of [`Category::key`]; `None` for an unknown key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sizes() {
        assert_eq!(Category::DevOps.feeds().len(), 3);
        assert_eq!(Category::Setup.feeds().len(), 3);
        assert_eq!(Category::Random.feeds().len(), 6);
    }

    #[test]
    fn test_key_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("weather"), None);
    }

    #[test]
    fn test_feeds_are_absolute_https_urls() {
        for category in Category::ALL {
            for feed in category.feeds() {
                let url = url::Url::parse(feed).unwrap();
                assert_eq!(url.scheme(), "https", "{feed}");
            }
        }
    }
}
