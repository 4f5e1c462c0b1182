//! Chunk building
//!
//! Merges the edit operations of one text node into maximal runs: unchanged
//! tokens become an [`Chunk::Equal`], and every stretch of replacements,
//! insertions and deletions between two unchanged runs becomes one
//! [`Chunk::Diff`]. Two adjacent chunks never have the same variant.

use crate::diff::EditOperation;
use crate::tokenizers::Token;

/// A renderable run of tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Tokens present on both sides
    Equal { tokens: Vec<Token> },
    /// Tokens removed from `before` and tokens added in `after`
    Diff {
        deletions: Vec<Token>,
        insertions: Vec<Token>,
    },
}

impl Chunk {
    /// Token the chunk starts with, as seen by the chunk before it
    ///
    /// For a diff chunk this is the first inserted token, or the first
    /// deleted one when nothing was inserted.
    pub fn first_token(&self) -> Option<&Token> {
        match self {
            Self::Equal { tokens } => tokens.first(),
            Self::Diff {
                deletions,
                insertions,
            } => insertions.first().or_else(|| deletions.first()),
        }
    }

    /// Token the chunk ends with, as seen by the chunk after it
    pub fn last_token(&self) -> Option<&Token> {
        match self {
            Self::Equal { tokens } => tokens.last(),
            Self::Diff {
                deletions,
                insertions,
            } => insertions.last().or_else(|| deletions.last()),
        }
    }
}

/// Builds the chunk list of a single node group
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    chunks: Vec<Chunk>,
    commons: Vec<Token>,
    deletions: Vec<Token>,
    insertions: Vec<Token>,
}

impl ChunkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the chunks for a sequence of operations
    pub fn build(operations: &[EditOperation]) -> Vec<Chunk> {
        let mut builder = Self::new();
        for op in operations {
            builder.push(op);
        }
        builder.finish()
    }

    /// Add the next operation
    pub fn push(&mut self, op: &EditOperation) {
        match op {
            EditOperation::Equal { new, .. } => {
                self.flush_diff();
                self.commons.push(new.token().clone());
            }
            EditOperation::Replace { old, new } => {
                self.flush_commons();
                self.deletions.push(old.token().clone());
                self.insertions.push(new.token().clone());
            }
            EditOperation::Insert { new } => {
                self.flush_commons();
                self.insertions.push(new.token().clone());
            }
            EditOperation::Delete { old } => {
                self.flush_commons();
                self.deletions.push(old.token().clone());
            }
        }
    }

    /// Flush pending runs, diff before common, and return the chunks
    pub fn finish(mut self) -> Vec<Chunk> {
        self.flush_diff();
        self.flush_commons();
        self.chunks
    }

    fn flush_commons(&mut self) {
        if !self.commons.is_empty() {
            self.chunks.push(Chunk::Equal {
                tokens: std::mem::take(&mut self.commons),
            });
        }
    }

    fn flush_diff(&mut self) {
        if !self.deletions.is_empty() || !self.insertions.is_empty() {
            self.chunks.push(Chunk::Diff {
                deletions: std::mem::take(&mut self.deletions),
                insertions: std::mem::take(&mut self.insertions),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TextFromNode;
    use crate::dom::NodeId;

    fn t(text: &str) -> TextFromNode {
        TextFromNode::new(Token::new(text), NodeId::new(0))
    }

    fn tokens(texts: &[&str]) -> Vec<Token> {
        texts.iter().map(|&text| Token::new(text)).collect()
    }

    fn equal(text: &str) -> EditOperation {
        EditOperation::Equal { old: t(text), new: t(text) }
    }

    #[test]
    fn test_merges_consecutive_equal_operations() {
        let chunks = ChunkBuilder::build(&[equal("foo"), equal("bar")]);
        assert_eq!(chunks, vec![Chunk::Equal { tokens: tokens(&["foo", "bar"]) }]);
    }

    #[test]
    fn test_equal_run_followed_by_insertion() {
        let chunks = ChunkBuilder::build(&[
            equal("foo"),
            equal("bar"),
            EditOperation::Insert { new: t("buz") },
        ]);
        assert_eq!(
            chunks,
            vec![
                Chunk::Equal { tokens: tokens(&["foo", "bar"]) },
                Chunk::Diff { deletions: vec![], insertions: tokens(&["buz"]) },
            ]
        );
    }

    #[test]
    fn test_equal_run_followed_by_deletion() {
        let chunks = ChunkBuilder::build(&[
            equal("foo"),
            equal("bar"),
            EditOperation::Delete { old: t("buz") },
        ]);
        assert_eq!(
            chunks,
            vec![
                Chunk::Equal { tokens: tokens(&["foo", "bar"]) },
                Chunk::Diff { deletions: tokens(&["buz"]), insertions: vec![] },
            ]
        );
    }

    #[test]
    fn test_equal_run_followed_by_replacement() {
        let chunks = ChunkBuilder::build(&[
            equal("foo"),
            equal("bar"),
            EditOperation::Replace { old: t("buz"), new: t("baz") },
        ]);
        assert_eq!(
            chunks,
            vec![
                Chunk::Equal { tokens: tokens(&["foo", "bar"]) },
                Chunk::Diff { deletions: tokens(&["buz"]), insertions: tokens(&["baz"]) },
            ]
        );
    }

    #[test]
    fn test_mixed_changes_merge_into_one_diff() {
        let chunks = ChunkBuilder::build(&[
            EditOperation::Delete { old: t("a") },
            EditOperation::Replace { old: t("b"), new: t("c") },
            EditOperation::Insert { new: t("d") },
            equal("e"),
        ]);
        assert_eq!(
            chunks,
            vec![
                Chunk::Diff { deletions: tokens(&["a", "b"]), insertions: tokens(&["c", "d"]) },
                Chunk::Equal { tokens: tokens(&["e"]) },
            ]
        );
    }

    #[test]
    fn test_equal_chunks_take_new_token() {
        let op = EditOperation::Equal {
            old: TextFromNode::new(Token::new("x"), NodeId::new(1)),
            new: TextFromNode::new(Token::new("x"), NodeId::new(2)),
        };
        let chunks = ChunkBuilder::build(&[op]);
        assert_eq!(chunks[0].first_token(), Some(&Token::new("x")));
    }

    #[test]
    fn test_boundary_tokens_of_diff_chunk() {
        let chunk = Chunk::Diff {
            deletions: tokens(&["old", "text"]),
            insertions: vec![],
        };
        assert_eq!(chunk.first_token(), Some(&Token::new("old")));
        assert_eq!(chunk.last_token(), Some(&Token::new("text")));

        let chunk = Chunk::Diff {
            deletions: tokens(&["old"]),
            insertions: tokens(&["new", "words"]),
        };
        assert_eq!(chunk.first_token(), Some(&Token::new("new")));
        assert_eq!(chunk.last_token(), Some(&Token::new("words")));
    }

    #[test]
    fn test_empty_input_has_no_chunks() {
        assert!(ChunkBuilder::build(&[]).is_empty());
    }
}
