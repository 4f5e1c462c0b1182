//! # Markdiff Library
//!
//! Word-level comparison of two HTML fragments. The visible text of both
//! fragments is tokenized, diffed, and written back into the markup of one of
//! them with deletions and insertions wrapped in `<del>` and `<ins>` (or
//! whatever the configured callbacks produce).
//!
//! ## Core Concepts
//!
//! - **Tokenizers**: Split the text of each node into words, punctuation and whitespace
//! - **Node attribution**: Every token remembers the text node it came from
//! - **Chunks**: Adjacent changes of one node are merged into renderable runs
//! - **DiffEngine**: Ties parsing, diffing and rendering together
//!
//! ## Example
//!
//! ```rust
//! use markdiff_core::{DiffConfig, DiffEngine, MarkupSource};
//!
//! let html = markdiff_core::compare("hello world", "hello my beautiful").unwrap();
//! assert_eq!(html, "hello <del>world</del><ins>my beautiful</ins>");
//!
//! let config = DiffConfig::default()
//!     .with_markup_from(MarkupSource::Before)
//!     .with_render_insertion(|html| format!("<mark>{html}</mark>"));
//!
//! let engine = DiffEngine::new(config);
//! let output = engine.diff("<b>byebye</b> world", "<i>hello</i> world").unwrap();
//! assert_eq!(output.html, "<b><del>byebye</del><mark>hello</mark></b> world");
//! assert_eq!(output.statistics.replacements, 1);
//! ```

pub mod algorithm;
pub mod chunks;
pub mod config;
pub mod diff;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod render;
pub mod tokenizers;

// Re-export main types
pub use config::{DiffAlgorithm, DiffConfig, MarkupSource};
pub use diff::{DiffStatistics, EditOperation, EditType, TextFromNode};
pub use engine::{DiffEngine, DiffOutput};
pub use error::{Error, Result};
pub use render::RenderFn;
pub use tokenizers::{PunctuationSet, Spacing, Token, Tokenizer, WordTokenizer};

/// Compare two HTML fragments with the default configuration
///
/// Changes are marked with `<del>` and `<ins>` inside the markup of `after`.
///
/// # Example
///
/// ```rust
/// let html = markdiff_core::compare("hello world", "hello, world").unwrap();
/// assert_eq!(html, "hello<ins>,</ins> world");
/// ```
pub fn compare(before: &str, after: &str) -> Result<String> {
    DiffEngine::default().compare(before, after)
}

/// Compare two HTML fragments with the given configuration
pub fn compare_with(before: &str, after: &str, config: &DiffConfig) -> Result<String> {
    DiffEngine::new(config.clone()).compare(before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_compare() {
        assert_eq!(compare("byebye", "hello").unwrap(), "<del>byebye</del><ins>hello</ins>");
    }

    #[test]
    fn test_compare_with_config() {
        let config = DiffConfig::default()
            .with_render_deletion(|html| format!("<s>{html}</s>"))
            .with_render_insertion(|html| format!("<u>{html}</u>"));

        assert_eq!(
            compare_with("byebye", "hello", &config).unwrap(),
            "<s>byebye</s><u>hello</u>"
        );
    }

    #[test]
    fn test_config_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffConfig>();
        assert_send_sync::<DiffEngine>();
    }
}
