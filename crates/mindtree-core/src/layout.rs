//! Left-to-right tree layout.
//!
//! Visual leaves (collapsed nodes and nodes without children) each take one vertical slot from a
//! single counter shared by the whole walk; an expanded parent is then centered between its first
//! and last visible child. Columns are fixed per depth.

use crate::collapse::CollapseState;
use crate::config::LayoutConfig;
use crate::model::{NodeKind, TreeNode};
use crate::sizing::{node_height, node_width};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub depth: usize,
    /// Box center.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_collapsed: bool,
    /// The source node owns a subtree, even when it is collapsed and nothing below it is shown.
    pub has_children: bool,
    /// Index of the parent in [`MindmapLayout::nodes`].
    pub parent: Option<usize>,
}

impl PositionedNode {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Right-center of the box, where outgoing edges start.
    pub fn source_anchor(&self) -> (f64, f64) {
        (self.x + self.half_width(), self.y)
    }

    /// Left-center of the box, where the incoming edge ends.
    pub fn target_anchor(&self) -> (f64, f64) {
        (self.x - self.half_width(), self.y)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).abs() <= self.half_width() && (y - self.y).abs() <= self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
    /// Depth of the `to` node.
    pub depth: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LayoutEdge {
    /// Control points of the connector curve: both are offset horizontally to the midpoint x
    /// and keep their own anchor's y.
    pub fn curve(&self) -> ((f64, f64), (f64, f64)) {
        let mx = (self.x1 + self.x2) / 2.0;
        ((mx, self.y1), (mx, self.y2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindmapLayout {
    /// Visible nodes in pre-order.
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f64,
    pub height: f64,
}

impl MindmapLayout {
    pub fn empty(config: &LayoutConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            width: config.min_canvas_width,
            height: config.min_canvas_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Hit test against node boxes.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.contains(x, y))
    }

    pub fn parent_of(&self, node: &PositionedNode) -> Option<&PositionedNode> {
        node.parent.and_then(|i| self.nodes.get(i))
    }
}

/// Computes positions for every visible node plus the connecting edges and canvas size.
///
/// `None` yields an empty layout with the minimum canvas. Node ids are assumed unique; see
/// [`TreeNode::validate`]. The walk keeps its own stack, so tree depth is bounded by memory only.
pub fn layout(
    root: Option<&TreeNode>,
    collapsed: &CollapseState,
    config: &LayoutConfig,
) -> MindmapLayout {
    let Some(root) = root else {
        return MindmapLayout::empty(config);
    };

    let mut placer = Placer {
        collapsed,
        config,
        slot: 0,
        nodes: Vec::new(),
    };
    placer.place(root);
    let nodes = placer.nodes;

    let edges = collect_edges(&nodes);
    let (width, height) = canvas_size(&nodes, config);

    tracing::debug!(
        root = %root.id,
        nodes = nodes.len(),
        edges = edges.len(),
        slots = placer.slot,
        width,
        height,
        "mind map layout computed"
    );

    MindmapLayout {
        nodes,
        edges,
        width,
        height,
    }
}

struct Placer<'a> {
    collapsed: &'a CollapseState,
    config: &'a LayoutConfig,
    slot: usize,
    nodes: Vec<PositionedNode>,
}

enum Step<'t> {
    Enter {
        node: &'t TreeNode,
        depth: usize,
        parent: Option<usize>,
    },
    /// All children of `nodes[index]` are placed; center it between the first and last.
    Center { index: usize },
}

impl Placer<'_> {
    /// Places `root` and its visible subtree in pre-order.
    fn place(&mut self, root: &TreeNode) {
        let cfg = self.config;
        // Index of the most recently placed child, per node.
        let mut last_child: Vec<usize> = Vec::new();
        let mut stack = vec![Step::Enter {
            node: root,
            depth: 0,
            parent: None,
        }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter {
                    node,
                    depth,
                    parent,
                } => {
                    let index = self.nodes.len();
                    let is_collapsed = self.collapsed.is_collapsed(&node.id);
                    self.nodes.push(PositionedNode {
                        id: node.id.clone(),
                        label: node.label.clone(),
                        kind: node.kind,
                        depth,
                        x: depth as f64 * cfg.x_gap + cfg.x_offset,
                        y: 0.0,
                        width: node_width(&node.label, node.kind, cfg),
                        height: node_height(cfg),
                        is_collapsed,
                        has_children: node.has_children(),
                        parent,
                    });
                    last_child.push(index);
                    if let Some(p) = parent {
                        last_child[p] = index;
                    }

                    if is_collapsed || !node.has_children() {
                        self.nodes[index].y = self.slot as f64 * cfg.y_gap + cfg.y_offset;
                        self.slot += 1;
                    } else {
                        // The first child is popped next, so it lands at `index + 1`.
                        stack.push(Step::Center { index });
                        stack.extend(node.children.iter().rev().map(|child| Step::Enter {
                            node: child,
                            depth: depth + 1,
                            parent: Some(index),
                        }));
                    }
                }
                Step::Center { index } => {
                    let first = self.nodes[index + 1].y;
                    let last = self.nodes[last_child[index]].y;
                    self.nodes[index].y = (first + last) / 2.0;
                }
            }
        }
    }
}

fn collect_edges(nodes: &[PositionedNode]) -> Vec<LayoutEdge> {
    nodes
        .iter()
        .filter_map(|child| {
            let parent = &nodes[child.parent?];
            let (x1, y1) = parent.source_anchor();
            let (x2, y2) = child.target_anchor();
            Some(LayoutEdge {
                from: parent.id.clone(),
                to: child.id.clone(),
                depth: child.depth,
                x1,
                y1,
                x2,
                y2,
            })
        })
        .collect()
}

fn canvas_size(nodes: &[PositionedNode], config: &LayoutConfig) -> (f64, f64) {
    if nodes.is_empty() {
        return (config.min_canvas_width, config.min_canvas_height);
    }
    let mut max_right = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for n in nodes {
        max_right = max_right.max(n.x + n.half_width());
        max_y = max_y.max(n.y);
    }
    (
        config.min_canvas_width.max(max_right + config.canvas_margin),
        config.min_canvas_height.max(max_y + config.canvas_margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_uses_minimum_canvas() {
        let root = TreeNode::new("r", "Root", NodeKind::Root);
        let out = layout(Some(&root), &CollapseState::new(), &LayoutConfig::default());
        assert_eq!(out.nodes.len(), 1);
        assert!(out.edges.is_empty());
        assert_eq!((out.nodes[0].x, out.nodes[0].y), (100.0, 50.0));
        assert_eq!((out.width, out.height), (800.0, 600.0));
    }

    #[test]
    fn curve_control_points_share_midpoint_x() {
        let e = LayoutEdge {
            from: "a".into(),
            to: "b".into(),
            depth: 1,
            x1: 170.0,
            y1: 90.0,
            x2: 330.0,
            y2: 50.0,
        };
        assert_eq!(e.curve(), ((250.0, 90.0), (250.0, 50.0)));
    }

    /// Builds `n0 -> n1 -> ... -> n{depth}` without recursion.
    fn chain(depth: usize) -> TreeNode {
        let mut node = TreeNode::new(format!("n{depth}"), "leaf", NodeKind::Child);
        for i in (0..depth).rev() {
            node = TreeNode::new(format!("n{i}"), "step", NodeKind::Child).with_child(node);
        }
        node
    }

    /// Tears a tree down iteratively; the derived drop glue recurses per level.
    fn dismantle(root: TreeNode) {
        let mut stack = vec![root];
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }

    #[test]
    fn very_deep_chain_lays_out_without_recursion() {
        let root = chain(5000);
        let out = layout(Some(&root), &CollapseState::new(), &LayoutConfig::default());
        assert_eq!(out.nodes.len(), 5001);
        assert_eq!(out.edges.len(), 5000);
        // One visual leaf, so every ancestor sits on its slot.
        assert!(out.nodes.iter().all(|n| n.y == 50.0));
        let last = &out.nodes[5000];
        assert_eq!((last.id.as_str(), last.depth, last.x), ("n5000", 5000, 1_500_100.0));
        assert_eq!(out.edges[4999].depth, 5000);
        assert_eq!(root.path_to("n5000").map(|p| p.len()), Some(5001));
        dismantle(root);
    }

    #[test]
    fn parent_centers_on_first_and_last_child_only() {
        let root = TreeNode::new("r", "Root", NodeKind::Root)
            .with_child(TreeNode::new("a", "A", NodeKind::Child))
            .with_child(
                TreeNode::new("b", "B", NodeKind::Child)
                    .with_child(TreeNode::new("b1", "B1", NodeKind::Child))
                    .with_child(TreeNode::new("b2", "B2", NodeKind::Child))
                    .with_child(TreeNode::new("b3", "B3", NodeKind::Child)),
            );
        let out = layout(Some(&root), &CollapseState::new(), &LayoutConfig::default());
        let y: Vec<f64> = out.nodes.iter().map(|n| n.y).collect();
        // r, a, b, b1, b2, b3
        assert_eq!(y, vec![130.0, 50.0, 210.0, 130.0, 210.0, 290.0]);
    }
}
