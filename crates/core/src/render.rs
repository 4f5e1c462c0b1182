//! Chunk rendering
//!
//! Turns the chunks of one text node back into markup. Unchanged runs are
//! written as text; diff chunks are handed to the deletion and insertion
//! callbacks. The delicate part is the separator space at the boundary of a
//! diff chunk: when both branches would start (or end) with the same space,
//! it is written once outside the tags instead of twice inside them.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::chunks::Chunk;
use crate::dom::escape_text;
use crate::tokenizers::{PunctuationSet, Spacing, Token};

/// Callback that wraps a run of changed text (already escaped HTML)
pub type RenderFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Wraps deleted text in `<del>`
pub fn default_deletion() -> RenderFn {
    Arc::new(|html: &str| format!("<del>{html}</del>"))
}

/// Wraps inserted text in `<ins>`
pub fn default_insertion() -> RenderFn {
    Arc::new(|html: &str| format!("<ins>{html}</ins>"))
}

/// Renders the chunk list of a single node
pub struct ChunkRenderer<'a> {
    render_deletion: &'a RenderFn,
    render_insertion: &'a RenderFn,
    punctuation: &'a PunctuationSet,
}

impl<'a> ChunkRenderer<'a> {
    pub fn new(
        render_deletion: &'a RenderFn,
        render_insertion: &'a RenderFn,
        punctuation: &'a PunctuationSet,
    ) -> Self {
        Self {
            render_deletion,
            render_insertion,
            punctuation,
        }
    }

    /// Render a node's chunks into markup
    pub fn render(&self, chunks: &[Chunk]) -> String {
        let mut out = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            match chunk {
                Chunk::Equal { tokens } => out.push_str(&self.render_tokens(tokens)),
                Chunk::Diff {
                    deletions,
                    insertions,
                } => {
                    let prev = i.checked_sub(1).and_then(|p| chunks[p].last_token());
                    let next = chunks.get(i + 1).and_then(Chunk::first_token);
                    self.render_diff(deletions, insertions, prev, next, &mut out);
                }
            }
        }

        trace!(chunks = chunks.len(), rendered = %out, "rendered node");
        out
    }

    fn render_diff(
        &self,
        deletions: &[Token],
        insertions: &[Token],
        prev: Option<&Token>,
        next: Option<&Token>,
        out: &mut String,
    ) {
        let deleted = self.layout(deletions, prev, next);
        let inserted = self.layout(insertions, prev, next);

        let mut deleted = deleted.as_str();
        let mut inserted = inserted.as_str();

        let shared_prefix = deleted.starts_with(' ') && inserted.starts_with(' ');
        if shared_prefix {
            deleted = &deleted[1..];
            inserted = &inserted[1..];
        }

        let shared_suffix = deleted.ends_with(' ') && inserted.ends_with(' ');
        if shared_suffix {
            deleted = &deleted[..deleted.len() - 1];
            inserted = &inserted[..inserted.len() - 1];
        }

        if shared_prefix {
            out.push(' ');
        }
        if !deleted.is_empty() {
            out.push_str(&(self.render_deletion)(deleted));
        }
        if !inserted.is_empty() {
            out.push_str(&(self.render_insertion)(inserted));
        }
        if shared_suffix {
            out.push(' ');
        }
    }

    /// One branch of a diff chunk including its boundary separators
    fn layout(&self, branch: &[Token], prev: Option<&Token>, next: Option<&Token>) -> String {
        match (branch.first(), branch.last()) {
            (Some(first), Some(last)) => {
                let mut text = String::from(self.join(prev, Some(first)));
                text.push_str(&self.render_tokens(branch));
                text.push_str(self.join(Some(last), next));
                text
            }
            _ => self.join(prev, next).to_string(),
        }
    }

    fn render_tokens(&self, tokens: &[Token]) -> String {
        let mut text = String::new();
        let mut prev: Option<&Token> = None;

        for token in tokens {
            if prev.is_some() {
                text.push_str(self.join(prev, Some(token)));
            }
            text.push_str(&render_token(token));
            prev = Some(token);
        }

        text
    }

    /// Separator between two neighbouring tokens
    ///
    /// Follows the source text where the tokenizer saw it. At the start of
    /// a text run, a space goes in unless `b` is joining punctuation.
    fn join(&self, a: Option<&Token>, b: Option<&Token>) -> &'static str {
        match (a, b) {
            (Some(a), Some(b)) if !a.is_whitespace() && !b.is_whitespace() => match b.spacing() {
                Spacing::Space => " ",
                Spacing::Joined => "",
                Spacing::Start if self.punctuation.matches(b) => "",
                Spacing::Start => " ",
            },
            _ => "",
        }
    }
}

impl fmt::Debug for ChunkRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkRenderer")
            .field("punctuation", self.punctuation)
            .finish_non_exhaustive()
    }
}

fn render_token(token: &Token) -> String {
    if token.is_whitespace() {
        " ".to_string()
    } else {
        escape_text(token.text())
    }
}
