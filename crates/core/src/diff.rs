//! Diff result types and structures

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::config::MarkupSource;
use crate::dom::NodeId;
use crate::tokenizers::Token;

/// A token together with the text node it was extracted from
///
/// Equality, ordering and hashing only look at the token text, so the
/// sequence diff matches the same word even when it moved to another node.
#[derive(Debug, Clone)]
pub struct TextFromNode {
    token: Token,
    node: NodeId,
}

impl TextFromNode {
    pub fn new(token: Token, node: NodeId) -> Self {
        Self { token, node }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn text(&self) -> &str {
        self.token.text()
    }

    /// The text node this token belongs to
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_whitespace(&self) -> bool {
        self.token.is_whitespace()
    }
}

impl PartialEq for TextFromNode {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for TextFromNode {}

impl PartialOrd for TextFromNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextFromNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.cmp(&other.token)
    }
}

impl Hash for TextFromNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

/// Type of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    /// Token is present on both sides
    Equal,
    /// Token was replaced by another one
    Replace,
    /// Token was inserted
    Insert,
    /// Token was deleted
    Delete,
}

/// A single entry of the edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Equal { old: TextFromNode, new: TextFromNode },
    Replace { old: TextFromNode, new: TextFromNode },
    Insert { new: TextFromNode },
    Delete { old: TextFromNode },
}

impl EditOperation {
    pub fn edit_type(&self) -> EditType {
        match self {
            Self::Equal { .. } => EditType::Equal,
            Self::Replace { .. } => EditType::Replace,
            Self::Insert { .. } => EditType::Insert,
            Self::Delete { .. } => EditType::Delete,
        }
    }

    /// Token on the `before` side, if any
    pub fn old_token(&self) -> Option<&TextFromNode> {
        match self {
            Self::Equal { old, .. } | Self::Replace { old, .. } | Self::Delete { old } => Some(old),
            Self::Insert { .. } => None,
        }
    }

    /// Token on the `after` side, if any
    pub fn new_token(&self) -> Option<&TextFromNode> {
        match self {
            Self::Equal { new, .. } | Self::Replace { new, .. } | Self::Insert { new } => Some(new),
            Self::Delete { .. } => None,
        }
    }

    /// Token on the side whose markup is kept
    pub fn side(&self, source: MarkupSource) -> Option<&TextFromNode> {
        match source {
            MarkupSource::Before => self.old_token(),
            MarkupSource::After => self.new_token(),
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal { new, .. } => write!(f, "= {:?}", new.text()),
            Self::Replace { old, new } => write!(f, "! {:?} -> {:?}", old.text(), new.text()),
            Self::Insert { new } => write!(f, "+ {:?}", new.text()),
            Self::Delete { old } => write!(f, "- {:?}", old.text()),
        }
    }
}

/// Statistics about a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStatistics {
    /// Number of unchanged tokens
    pub equal: usize,

    /// Number of inserted tokens
    pub insertions: usize,

    /// Number of deleted tokens
    pub deletions: usize,

    /// Number of replaced tokens
    pub replacements: usize,

    /// Tokens extracted from `before`
    pub old_tokens: usize,

    /// Tokens extracted from `after`
    pub new_tokens: usize,

    /// Text nodes that received rendered output
    pub node_groups: usize,
}

impl DiffStatistics {
    pub fn from_operations(operations: &[EditOperation]) -> Self {
        let mut stats = Self::default();

        for op in operations {
            match op.edit_type() {
                EditType::Equal => stats.equal += 1,
                EditType::Replace => stats.replacements += 1,
                EditType::Insert => stats.insertions += 1,
                EditType::Delete => stats.deletions += 1,
            }
            if op.old_token().is_some() {
                stats.old_tokens += 1;
            }
            if op.new_token().is_some() {
                stats.new_tokens += 1;
            }
        }

        stats
    }

    /// Number of operations that are not `Equal`
    pub fn changes(&self) -> usize {
        self.insertions + self.deletions + self.replacements
    }

    /// Fraction of operations that changed something (0.0 to 1.0)
    pub fn change_ratio(&self) -> f64 {
        let total = self.changes() + self.equal;
        if total == 0 {
            0.0
        } else {
            self.changes() as f64 / total as f64
        }
    }

    /// Check if the comparison found no changes
    pub fn is_unchanged(&self) -> bool {
        self.changes() == 0
    }
}
