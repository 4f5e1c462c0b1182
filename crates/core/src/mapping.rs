//! Node attribution
//!
//! Assigns every entry of an edit script to the text node of the kept markup
//! that will display it. Operations that carry a token on the kept side go to
//! that token's node. Operations that do not (deletions when the `after`
//! markup is kept, insertions when the `before` markup is kept) join the node
//! of the closest preceding attributed operation, or, at the start of the
//! script, wait for the first one.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::MarkupSource;
use crate::diff::{EditOperation, TextFromNode};
use crate::dom::NodeId;

/// The edit operations rendered into one text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub node: NodeId,
    pub operations: Vec<EditOperation>,
}

/// Where the next unattributed operation goes
#[derive(Debug)]
enum Attribution {
    /// No node seen yet; operations wait here in script order
    Pending(Vec<EditOperation>),
    /// Operations without a node of their own join this one
    Attached(NodeId),
}

/// Groups edit operations by the node they are displayed in
#[derive(Debug)]
pub struct NodeMap {
    side: MarkupSource,
    state: Attribution,
    groups: IndexMap<NodeId, Vec<EditOperation>>,
}

impl NodeMap {
    /// Create an empty map attributing operations to the `side` markup
    pub fn new(side: MarkupSource) -> Self {
        Self {
            side,
            state: Attribution::Pending(Vec::new()),
            groups: IndexMap::new(),
        }
    }

    /// Group a whole edit script
    ///
    /// Groups come out in the order their node was first attributed, each
    /// holding its operations in script order.
    pub fn group_by_node(
        script: impl IntoIterator<Item = EditOperation>,
        side: MarkupSource,
    ) -> Vec<NodeGroup> {
        let mut map = Self::new(side);
        for op in script {
            map.push(op);
        }
        map.finish()
    }

    /// Attribute the next operation of the script
    pub fn push(&mut self, op: EditOperation) {
        match op.side(self.side).map(TextFromNode::node) {
            Some(node) => {
                let group = self.groups.entry(node).or_default();
                let previous = std::mem::replace(&mut self.state, Attribution::Attached(node));
                if let Attribution::Pending(stash) = previous {
                    group.extend(stash);
                }
                group.push(op);
            }
            None => match &mut self.state {
                Attribution::Pending(stash) => stash.push(op),
                Attribution::Attached(last) => self.groups.entry(*last).or_default().push(op),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finish the script and return the groups
    ///
    /// Operations still waiting for a node are dropped; this only happens
    /// when the kept markup has no text at all.
    pub fn finish(self) -> Vec<NodeGroup> {
        if let Attribution::Pending(stash) = &self.state {
            if !stash.is_empty() {
                debug!(
                    discarded = stash.len(),
                    side = %self.side,
                    "no text node to attribute operations to"
                );
            }
        }

        self.groups
            .into_iter()
            .map(|(node, operations)| NodeGroup { node, operations })
            .collect()
    }
}
