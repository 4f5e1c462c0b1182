//! Main diff engine that orchestrates the entire comparison

use serde::Serialize;
use tracing::{debug, trace};

use crate::algorithm::{LcsAlgorithm, MyersAlgorithm, PatienceAlgorithm, SequenceDiff};
use crate::chunks::ChunkBuilder;
use crate::config::{DiffAlgorithm, DiffConfig, MarkupSource};
use crate::diff::{DiffStatistics, EditOperation, TextFromNode};
use crate::dom::Fragment;
use crate::error::Result;
use crate::extract::extract_text;
use crate::mapping::NodeMap;
use crate::render::ChunkRenderer;

/// Result of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffOutput {
    /// The kept fragment with changes marked up
    pub html: String,

    /// Counts describing the edit script
    pub statistics: DiffStatistics,
}

/// The main diff engine
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create a new diff engine with the given configuration
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two fragments and return only the marked-up HTML
    pub fn compare(&self, before: &str, after: &str) -> Result<String> {
        Ok(self.diff(before, after)?.html)
    }

    /// Compare two fragments
    ///
    /// This is the main entry point that orchestrates the whole comparison:
    /// 1. Parse both fragments
    /// 2. Extract the visible text of each as tokens tied to their text node
    /// 3. Run the diff algorithm over the two token sequences
    /// 4. Group the edit script by the text nodes of the kept fragment
    /// 5. Render every group and splice it into its node
    /// 6. Serialize the kept fragment
    pub fn diff(&self, before: &str, after: &str) -> Result<DiffOutput> {
        let before_fragment = Fragment::parse(before)?;
        let after_fragment = Fragment::parse(after)?;

        let tokenizer = self.config.tokenizer();
        let old_tokens = extract_text(&before_fragment, tokenizer);
        let new_tokens = extract_text(&after_fragment, tokenizer);

        let operations = self.compute_diff_operations(&old_tokens, &new_tokens);
        let mut statistics = DiffStatistics::from_operations(&operations);

        debug!(
            algorithm = %self.config.algorithm,
            markup_from = %self.config.markup_from,
            old_tokens = old_tokens.len(),
            new_tokens = new_tokens.len(),
            operations = operations.len(),
            changes = statistics.changes(),
            "computed edit script"
        );

        let mut target = match self.config.markup_from {
            MarkupSource::Before => before_fragment,
            MarkupSource::After => after_fragment,
        };

        let groups = NodeMap::group_by_node(operations, self.config.markup_from);
        statistics.node_groups = groups.len();

        let renderer = ChunkRenderer::new(
            self.config.render_deletion(),
            self.config.render_insertion(),
            &self.config.punctuation,
        );

        for group in &groups {
            let chunks = ChunkBuilder::build(&group.operations);
            let markup = renderer.render(&chunks);
            trace!(
                node = group.node.index(),
                operations = group.operations.len(),
                chunks = chunks.len(),
                "replacing text node"
            );
            target.replace_with_markup(group.node, markup);
        }

        let html = target.to_html();
        debug!(groups = groups.len(), bytes = html.len(), "rendered comparison");

        Ok(DiffOutput { html, statistics })
    }

    /// Compute diff operations using the configured algorithm
    fn compute_diff_operations(
        &self,
        old: &[TextFromNode],
        new: &[TextFromNode],
    ) -> Vec<EditOperation> {
        let algorithm: Box<dyn SequenceDiff> = match self.config.algorithm {
            DiffAlgorithm::Myers => Box::new(MyersAlgorithm::new()),
            DiffAlgorithm::Patience => Box::new(PatienceAlgorithm::new()),
            DiffAlgorithm::Lcs => Box::new(LcsAlgorithm::new()),
        };

        algorithm.compute(old, new)
    }
}
