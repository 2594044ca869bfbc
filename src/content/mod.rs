//! Content normalization for feed summaries.
//!
//! Feed summaries arrive as HTML fragments of wildly varying quality. This
//! module turns them into plain text ([`clean_html`]) and escapes plain text
//! for MarkdownV2-style captions ([`escape_markdown`]).
//!
//! Escaping must run last: truncate the cleaned text first, then escape, so
//! a cut never lands between a backslash and the character it escapes.

mod html;
mod markdown;

pub use html::clean_html;
pub use markdown::escape_markdown;
