//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the default `WordTokenizer`, which splits
//! the text of a single markup node into words, punctuation marks and
//! whitespace runs. Whitespace runs are kept as empty tokens so that leading
//! and trailing spaces of a node take part in the diff.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Characters that start a new token when they appear after other text
pub const SPLIT_PUNCTUATION: [char; 10] = ['!', '?', '.', ';', '"', '\'', '(', ')', '`', ','];

/// Coarse classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Any run of text that is not punctuation or whitespace
    Word,
    /// A single punctuation character from [`SPLIT_PUNCTUATION`]
    Punctuation,
    /// A collapsed whitespace run (canonical text is empty)
    Whitespace,
}

/// What separated a token from the text before it in its text run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Spacing {
    /// First token of a text run, nothing is known about its left side
    #[default]
    Start,
    /// Whitespace preceded the token
    Space,
    /// The token directly follows other text, as `'t` in `don't`
    Joined,
}

/// A single token of text
///
/// Whitespace runs are represented by the empty string. Equality, ordering
/// and hashing only look at the text; the [`Spacing`] is layout information.
#[derive(Debug, Clone, Default)]
pub struct Token {
    text: String,
    spacing: Spacing,
}

impl Token {
    /// Create a token from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_spacing(text, Spacing::Start)
    }

    /// Create a token that remembers how it was separated from its predecessor
    pub fn with_spacing(text: impl Into<String>, spacing: Spacing) -> Self {
        Self {
            text: text.into(),
            spacing,
        }
    }

    /// Create a whitespace token
    pub fn whitespace() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Whether this token stands for a whitespace run
    pub fn is_whitespace(&self) -> bool {
        self.text.is_empty()
    }

    pub fn kind(&self) -> TokenKind {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => TokenKind::Whitespace,
            (Some(c), None) if SPLIT_PUNCTUATION.contains(&c) => TokenKind::Punctuation,
            _ => TokenKind::Word,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whitespace() {
            f.write_str(" ")
        } else {
            f.write_str(&self.text)
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Punctuation marks that bind to the preceding token without a space
///
/// Only single-character punctuation tokens can match. The default set is
/// `,` and `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationSet {
    chars: Vec<char>,
}

impl PunctuationSet {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// Every character the tokenizer splits on
    pub fn all() -> Self {
        Self::new(SPLIT_PUNCTUATION)
    }

    /// Whether `token` is a punctuation mark in this set
    pub fn matches(&self, token: &Token) -> bool {
        token.kind() == TokenKind::Punctuation
            && token.text().chars().next().is_some_and(|c| self.chars.contains(&c))
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for PunctuationSet {
    fn default() -> Self {
        Self::new([',', '.'])
    }
}

/// Trait for tokenizers that split the text of one node into tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize a text run
    ///
    /// Implementations must return at least one token; empty or
    /// whitespace-only input yields a single whitespace token.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").field("name", &self.name()).finish()
    }
}

/// Word tokenizer
///
/// Splits before every character of [`SPLIT_PUNCTUATION`] and at whitespace
/// runs. A punctuation mark is not separated from the text that follows it,
/// so `"(foo"` stays one token while `"foo)"` becomes `"foo"` and `")"`.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut fields: Vec<(String, Spacing)> = Vec::new();
        let mut current = String::new();
        let mut spacing = Spacing::Start;
        let mut in_whitespace = false;

        for (pos, ch) in text.char_indices() {
            if is_whitespace(ch) {
                // A leading run yields an empty field, a run after text ends it.
                if !in_whitespace && (pos == 0 || !current.is_empty()) {
                    fields.push((std::mem::take(&mut current), spacing));
                }
                in_whitespace = true;
                spacing = Spacing::Space;
                continue;
            }

            in_whitespace = false;
            if SPLIT_PUNCTUATION.contains(&ch) && !current.is_empty() {
                fields.push((std::mem::take(&mut current), spacing));
                spacing = Spacing::Joined;
            }
            current.push(ch);
        }

        if !current.is_empty() {
            fields.push((current, spacing));
        }

        while fields.last().is_some_and(|(f, _)| f.is_empty()) {
            fields.pop();
        }

        if in_whitespace || fields.is_empty() {
            fields.push((String::new(), spacing));
        }

        fields
            .into_iter()
            .map(|(text, spacing)| Token::with_spacing(text, spacing))
            .collect()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}
