use similar::Algorithm;

use crate::algorithm::{edit_script, SequenceDiff};
use crate::diff::{EditOperation, TextFromNode};

/// Classic dynamic-programming LCS
///
/// Memory grows with the product of both token counts; prefer Myers for
/// long documents.
pub struct LcsAlgorithm;

impl LcsAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LcsAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceDiff for LcsAlgorithm {
    fn compute(&self, old: &[TextFromNode], new: &[TextFromNode]) -> Vec<EditOperation> {
        edit_script(Algorithm::Lcs, old, new)
    }

    fn name(&self) -> &str {
        "lcs"
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{create_tokens, summary};
    use super::*;

    #[test]
    fn test_lcs_insertions_around_match() {
        let orig = create_tokens("hello world");
        let modified = create_tokens("why hello beautiful world");

        let ops = LcsAlgorithm::new().compute(&orig, &modified);

        assert_eq!(
            summary(&ops),
            vec![
                "+ \"why\"",
                "= \"hello\"",
                "+ \"beautiful\"",
                "= \"world\""
            ]
        );
    }
}
