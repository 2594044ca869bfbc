//! Utility functions for common operations.
//!
//! - **Text processing**: character-aware truncation for captions
//!
//! # Examples
//!
//! ```
//! use readbot::util::truncate_chars;
//!
//! assert_eq!(truncate_chars("Hello World", 5), "Hello");
//! ```

mod text;

pub use text::truncate_chars;
