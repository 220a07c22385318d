use crate::model::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of the nodes whose subtrees are currently hidden.
///
/// Membership is independent of tree shape: an id that is not part of the displayed tree is
/// simply ignored by the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseState {
    ids: BTreeSet<String>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(root: &TreeNode) -> Self {
        let mut state = Self::new();
        state.seed(root);
        state
    }

    /// Replaces the set with every non-root node that has children, leaving only the root and
    /// its direct children visible.
    pub fn seed(&mut self, root: &TreeNode) {
        self.ids = root
            .iter()
            .filter(|(depth, n)| *depth > 0 && n.has_children())
            .map(|(_, n)| n.id.clone())
            .collect();
    }

    /// Flips membership of `id` and returns whether it is collapsed afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the id was newly inserted.
    pub fn collapse(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Returns `true` if the id was present.
    pub fn expand(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Expands everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Collapses every node that has children, the root included.
    pub fn collapse_all(&mut self, root: &TreeNode) {
        self.ids = root
            .iter()
            .filter(|(_, n)| n.has_children())
            .map(|(_, n)| n.id.clone())
            .collect();
    }

    /// Expands every ancestor of `id` so the node becomes visible. The node itself keeps its
    /// own state. Returns `false` when `id` is not part of the tree.
    pub fn reveal(&mut self, root: &TreeNode, id: &str) -> bool {
        let Some(path) = root.path_to(id) else {
            return false;
        };
        if let Some((_, ancestors)) = path.split_last() {
            for ancestor in ancestors {
                self.ids.remove(*ancestor);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CollapseState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
