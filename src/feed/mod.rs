//! Feed fetching and article selection.
//!
//! - [`parser`] - reduce RSS/Atom documents to [`FeedEntry`] values via `feed-rs`
//! - [`fetcher`] - one HTTP attempt per source with a fixed timeout
//! - [`image`] - cover image resolution with a fallback pool
//! - [`selector`] - shuffle sources, return the first usable article
//! - [`sources`] - the built-in categories
//!
//! # Example
//!
//! ```ignore
//! use readbot::feed::{ArticleSelector, Category, Fetcher};
//!
//! let selector = ArticleSelector::new(Fetcher::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)?);
//! if let Some(article) = selector.select(Category::DevOps.feeds()).await {
//!     println!("{}", article.title);
//! }
//! ```

pub mod fetcher;
pub mod image;
pub mod parser;
pub mod selector;
pub mod sources;

pub use fetcher::{FeedFetch, FetchError, Fetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use image::resolve_image;
pub use parser::{parse_feed, FeedEntry, ParsedFeed};
pub use selector::{Article, ArticleSelector};
pub use sources::Category;
