use similar::Algorithm;

use crate::algorithm::{edit_script, SequenceDiff};
use crate::diff::{EditOperation, TextFromNode};

/// Myers O(ND) diff algorithm
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceDiff for MyersAlgorithm {
    fn compute(&self, old: &[TextFromNode], new: &[TextFromNode]) -> Vec<EditOperation> {
        edit_script(Algorithm::Myers, old, new)
    }

    fn name(&self) -> &str {
        "myers"
    }
}
