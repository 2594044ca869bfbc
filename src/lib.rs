//! A chat bot that delivers one article at a time from web feeds.
//!
//! The pipeline runs [`feed::Fetcher`] → [`feed::ArticleSelector`] →
//! [`content`] normalization → [`bot::render`], with per-chat
//! topics kept in a [`session::SessionStore`].

pub mod bot;
pub mod config;
pub mod content;
pub mod feed;
pub mod scheduler;
pub mod session;
pub mod util;
