//! Configuration for the diff engine

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::render::{default_deletion, default_insertion, RenderFn};
use crate::tokenizers::{PunctuationSet, Tokenizer, WordTokenizer};

/// Which of the two fragments supplies the markup of the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupSource {
    /// Keep the structure of the `before` fragment
    Before,
    /// Keep the structure of the `after` fragment
    #[default]
    After,
}

impl MarkupSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for MarkupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(Error::InvalidMarkupSource(s.to_string())),
        }
    }
}

/// Diff algorithm selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers O(ND) algorithm (default, fast for small differences)
    #[default]
    Myers,
    /// Patience diff (anchors on unique words, more human-readable for reworded text)
    Patience,
    /// Classic LCS table
    Lcs,
}

impl DiffAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Myers => "myers",
            Self::Patience => "patience",
            Self::Lcs => "lcs",
        }
    }
}

impl fmt::Display for DiffAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            "lcs" => Ok(Self::Lcs),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Configuration for a comparison
#[derive(Clone)]
pub struct DiffConfig {
    /// Fragment whose markup is kept in the output
    pub markup_from: MarkupSource,

    /// Algorithm to use for computing the edit script
    pub algorithm: DiffAlgorithm,

    /// Wraps inserted text
    pub(crate) render_insertion: RenderFn,

    /// Wraps deleted text
    pub(crate) render_deletion: RenderFn,

    /// Tokenizer for the text of each node
    pub(crate) tokenizer: Box<dyn Tokenizer>,

    /// Punctuation written without a space before it
    pub punctuation: PunctuationSet,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            markup_from: MarkupSource::default(),
            algorithm: DiffAlgorithm::default(),
            render_insertion: default_insertion(),
            render_deletion: default_deletion(),
            tokenizer: Box::new(WordTokenizer::new()),
            punctuation: PunctuationSet::default(),
        }
    }

    /// Set which fragment supplies the output markup
    pub fn with_markup_from(mut self, markup_from: MarkupSource) -> Self {
        self.markup_from = markup_from;
        self
    }

    /// Set the diff algorithm
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the callback that wraps inserted text
    ///
    /// The callback receives escaped HTML and returns the markup written to
    /// the output.
    pub fn with_render_insertion<F>(mut self, render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.render_insertion = Arc::new(render);
        self
    }

    /// Set the callback that wraps deleted text
    pub fn with_render_deletion<F>(mut self, render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.render_deletion = Arc::new(render);
        self
    }

    /// Set the tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Set the punctuation that binds to the preceding word
    pub fn with_punctuation(mut self, punctuation: PunctuationSet) -> Self {
        self.punctuation = punctuation;
        self
    }

    pub fn render_insertion(&self) -> &RenderFn {
        &self.render_insertion
    }

    pub fn render_deletion(&self) -> &RenderFn {
        &self.render_deletion
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }
}

impl fmt::Debug for DiffConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffConfig")
            .field("markup_from", &self.markup_from)
            .field("algorithm", &self.algorithm)
            .field("tokenizer", &self.tokenizer.name())
            .field("punctuation", &self.punctuation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiffConfig::default();
        assert_eq!(config.markup_from, MarkupSource::After);
        assert_eq!(config.algorithm, DiffAlgorithm::Myers);
        assert_eq!(config.tokenizer().name(), "word");
        assert_eq!(config.punctuation, PunctuationSet::default());
        assert_eq!((config.render_insertion())("x"), "<ins>x</ins>");
        assert_eq!((config.render_deletion())("x"), "<del>x</del>");
    }

    #[test]
    fn test_builder() {
        let config = DiffConfig::new()
            .with_markup_from(MarkupSource::Before)
            .with_algorithm(DiffAlgorithm::Patience)
            .with_render_insertion(|html| format!("<new>{html}</new>"))
            .with_render_deletion(|html| format!("<old>{html}</old>"))
            .with_punctuation(PunctuationSet::all());

        assert_eq!(config.markup_from, MarkupSource::Before);
        assert_eq!(config.algorithm, DiffAlgorithm::Patience);
        assert_eq!((config.render_insertion())("x"), "<new>x</new>");
        assert_eq!((config.render_deletion())("x"), "<old>x</old>");
        assert_eq!(config.punctuation, PunctuationSet::all());
    }

    #[test]
    fn test_markup_source_from_str() {
        assert_eq!("before".parse::<MarkupSource>().unwrap(), MarkupSource::Before);
        assert_eq!("after".parse::<MarkupSource>().unwrap(), MarkupSource::After);
        assert_eq!("Before".parse::<MarkupSource>().unwrap(), MarkupSource::Before);
        assert_eq!("AFTER".parse::<MarkupSource>().unwrap(), MarkupSource::After);
        assert!(matches!(
            "during".parse::<MarkupSource>(),
            Err(Error::InvalidMarkupSource(s)) if s == "during"
        ));
        assert_eq!(MarkupSource::Before.to_string(), "before");
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("myers".parse::<DiffAlgorithm>().unwrap(), DiffAlgorithm::Myers);
        assert_eq!("Patience".parse::<DiffAlgorithm>().unwrap(), DiffAlgorithm::Patience);
        assert_eq!("lcs".parse::<DiffAlgorithm>().unwrap(), DiffAlgorithm::Lcs);
        assert!(matches!(
            "histogram".parse::<DiffAlgorithm>(),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let source: MarkupSource = serde_json::from_str("\"before\"").unwrap();
        assert_eq!(source, MarkupSource::Before);
        assert_eq!(serde_json::to_string(&DiffAlgorithm::Lcs).unwrap(), "\"lcs\"");
        assert!(serde_json::from_str::<MarkupSource>("\"sideways\"").is_err());
    }

    #[test]
    fn test_debug_names_tokenizer() {
        let debug = format!("{:?}", DiffConfig::default());
        assert!(debug.contains("\"word\""));
        assert!(debug.contains("After"));
    }
}
