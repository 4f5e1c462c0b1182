//! Sequence diff algorithms
//!
//! Computes the token-level edit script between the `before` and `after`
//! texts. The algorithms themselves come from `similar`; this module turns
//! their grouped output into a balanced, one-token-per-entry script. Inside
//! each changed region, deleted and inserted tokens are paired up as
//! replacements in order, and the unpaired rest follows as plain deletions
//! or insertions.
pub mod lcs;
pub mod myers;
pub mod patience;

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::diff::{EditOperation, TextFromNode};

pub use lcs::LcsAlgorithm;
pub use myers::MyersAlgorithm;
pub use patience::PatienceAlgorithm;

/// Trait for sequence diff algorithms
pub trait SequenceDiff: Send + Sync {
    /// Compute the edit script that turns `old` into `new`
    ///
    /// Every token of `old` appears exactly once on the old side of the
    /// script and every token of `new` exactly once on the new side, both in
    /// their original order.
    fn compute(&self, old: &[TextFromNode], new: &[TextFromNode]) -> Vec<EditOperation>;

    /// Get the name of this algorithm
    fn name(&self) -> &str;
}

// ============================================================================
// Helper Functions
// ============================================================================

fn edit_script(algorithm: Algorithm, old: &[TextFromNode], new: &[TextFromNode]) -> Vec<EditOperation> {
    let mut script = Vec::with_capacity(old.len().max(new.len()));
    let mut removed: Vec<&TextFromNode> = Vec::new();
    let mut added: Vec<&TextFromNode> = Vec::new();

    for op in capture_diff_slices(algorithm, old, new) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                flush_changes(&mut script, &mut removed, &mut added);
                script.extend((0..len).map(|i| EditOperation::Equal {
                    old: old[old_index + i].clone(),
                    new: new[new_index + i].clone(),
                }));
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => removed.extend(&old[old_index..old_index + old_len]),
            DiffOp::Insert {
                new_index, new_len, ..
            } => added.extend(&new[new_index..new_index + new_len]),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                removed.extend(&old[old_index..old_index + old_len]);
                added.extend(&new[new_index..new_index + new_len]);
            }
        }
    }
    flush_changes(&mut script, &mut removed, &mut added);

    script
}

/// Emit one change region: pairs first, then the longer side's leftovers
fn flush_changes(
    script: &mut Vec<EditOperation>,
    removed: &mut Vec<&TextFromNode>,
    added: &mut Vec<&TextFromNode>,
) {
    let paired = removed.len().min(added.len());

    script.extend(removed.iter().zip(added.iter()).map(|(o, n)| EditOperation::Replace {
        old: (*o).clone(),
        new: (*n).clone(),
    }));
    script.extend(removed[paired..].iter().map(|t| EditOperation::Delete { old: (*t).clone() }));
    script.extend(added[paired..].iter().map(|t| EditOperation::Insert { new: (*t).clone() }));

    removed.clear();
    added.clear();
}
