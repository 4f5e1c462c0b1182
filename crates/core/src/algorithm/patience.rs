use similar::Algorithm;

use crate::algorithm::{edit_script, SequenceDiff};
use crate::diff::{EditOperation, TextFromNode};

/// Patience diff algorithm
///
/// Anchors on tokens that occur exactly once on each side, which tends to
/// keep long unchanged sentences aligned in heavily edited text.
pub struct PatienceAlgorithm;

impl PatienceAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatienceAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceDiff for PatienceAlgorithm {
    fn compute(&self, old: &[TextFromNode], new: &[TextFromNode]) -> Vec<EditOperation> {
        edit_script(Algorithm::Patience, old, new)
    }

    fn name(&self) -> &str {
        "patience"
    }
}
