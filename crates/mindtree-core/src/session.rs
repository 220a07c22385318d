use crate::collapse::CollapseState;
use crate::config::LayoutConfig;
use crate::layout::{MindmapLayout, layout};
use crate::model::TreeNode;
use crate::Result;

/// Receives collapse-control activations from a rendering surface.
pub trait ToggleHandler {
    /// Returns `true` when the activation changed what is displayed.
    fn on_toggle(&mut self, id: &str) -> bool;
}

/// Interactive state for one displayed mind map: the tree, its collapsed set, and the layout
/// derived from both. Every mutation recomputes the layout before returning.
#[derive(Debug, Clone)]
pub struct MindmapSession {
    tree: Option<TreeNode>,
    collapsed: CollapseState,
    config: LayoutConfig,
    layout: MindmapLayout,
}

impl Default for MindmapSession {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl MindmapSession {
    pub fn new(config: LayoutConfig) -> Self {
        let layout = MindmapLayout::empty(&config);
        Self {
            tree: None,
            collapsed: CollapseState::new(),
            config,
            layout,
        }
    }

    /// Installs a new tree and reseeds the collapsed set, discarding any previous state.
    pub fn load(&mut self, tree: TreeNode) -> Result<()> {
        tree.validate()?;
        self.collapsed.seed(&tree);
        tracing::debug!(
            root = %tree.id,
            nodes = tree.node_count(),
            collapsed = self.collapsed.len(),
            "mind map tree loaded"
        );
        self.tree = Some(tree);
        self.relayout();
        Ok(())
    }

    /// Drops the tree; the layout becomes an empty canvas.
    pub fn clear(&mut self) {
        self.tree = None;
        self.collapsed.clear();
        self.relayout();
    }

    /// Toggles a node that has children. Unknown ids and leaves are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(tree) = self.tree.as_ref() else {
            return false;
        };
        if !tree.find(id).is_some_and(TreeNode::has_children) {
            tracing::trace!(id, "toggle ignored: no such parent node");
            return false;
        }
        let now_collapsed = self.collapsed.toggle(id);
        tracing::debug!(id, collapsed = now_collapsed, "mind map node toggled");
        self.relayout();
        true
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
        self.relayout();
    }

    pub fn collapse_all(&mut self) {
        if let Some(tree) = self.tree.as_ref() {
            self.collapsed.collapse_all(tree);
        }
        self.relayout();
    }

    /// Expands the ancestors of `id`. Returns `false` if the node is not in the tree.
    pub fn reveal(&mut self, id: &str) -> bool {
        let Some(tree) = self.tree.as_ref() else {
            return false;
        };
        if !self.collapsed.reveal(tree, id) {
            return false;
        }
        self.relayout();
        true
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.relayout();
        Ok(())
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    pub fn collapsed(&self) -> &CollapseState {
        &self.collapsed
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> &MindmapLayout {
        &self.layout
    }

    fn relayout(&mut self) {
        self.layout = layout(self.tree.as_ref(), &self.collapsed, &self.config);
    }
}

impl ToggleHandler for MindmapSession {
    fn on_toggle(&mut self, id: &str) -> bool {
        self.toggle(id)
    }
}
