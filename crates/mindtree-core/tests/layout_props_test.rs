use mindtree_core::sizing::node_width;
use mindtree_core::{CollapseState, LayoutConfig, NodeKind, TreeNode, layout};
use proptest::prelude::*;

/// Builds a tree from a parent-index list: node `i + 1` hangs under node `parents[i] % (i + 1)`.
fn tree_from_parents(parents: &[usize], labels: &[String]) -> TreeNode {
    fn build(idx: usize, children: &[Vec<usize>], labels: &[String]) -> TreeNode {
        let kind = match idx {
            0 => NodeKind::Root,
            i if i % 3 == 0 => NodeKind::Code,
            _ => NodeKind::Child,
        };
        let label = labels.get(idx).cloned().unwrap_or_default();
        let mut node = TreeNode::new(format!("n{idx}"), label, kind);
        for &c in &children[idx] {
            node.push_child(build(c, children, labels));
        }
        node
    }

    let n = parents.len() + 1;
    let mut children = vec![Vec::new(); n];
    for (i, p) in parents.iter().enumerate() {
        children[p % (i + 1)].push(i + 1);
    }
    build(0, &children, labels)
}

fn arb_tree() -> impl Strategy<Value = TreeNode> {
    (
        prop::collection::vec(0usize..64, 0..40),
        prop::collection::vec("[a-zA-Z ]{0,30}", 41),
    )
        .prop_map(|(parents, labels)| tree_from_parents(&parents, &labels))
}

fn arb_case() -> impl Strategy<Value = (TreeNode, CollapseState)> {
    arb_tree().prop_flat_map(|tree| {
        let n = tree.node_count();
        prop::collection::vec(any::<bool>(), n).prop_map(move |mask| {
            let collapsed: CollapseState = tree
                .iter()
                .zip(mask)
                .filter(|(_, on)| *on)
                .map(|((_, node), _)| node.id.clone())
                .collect();
            (tree.clone(), collapsed)
        })
    })
}

/// Ids whose ancestors are all expanded, in pre-order.
fn expected_visible(node: &TreeNode, collapsed: &CollapseState, out: &mut Vec<String>) {
    out.push(node.id.clone());
    if collapsed.is_collapsed(&node.id) {
        return;
    }
    for c in &node.children {
        expected_visible(c, collapsed, out);
    }
}

proptest! {
    #[test]
    fn layout_is_deterministic((tree, collapsed) in arb_case()) {
        let cfg = LayoutConfig::default();
        let a = layout(Some(&tree), &collapsed, &cfg);
        let b = layout(Some(&tree), &collapsed, &cfg);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn visible_nodes_are_those_with_expanded_ancestors((tree, collapsed) in arb_case()) {
        let out = layout(Some(&tree), &collapsed, &LayoutConfig::default());
        let mut expected = Vec::new();
        expected_visible(&tree, &collapsed, &mut expected);
        let got: Vec<String> = out.nodes.iter().map(|n| n.id.clone()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn one_edge_per_visible_parent_child_pair((tree, collapsed) in arb_case()) {
        let out = layout(Some(&tree), &collapsed, &LayoutConfig::default());
        let expected: usize = out
            .nodes
            .iter()
            .filter(|n| !n.is_collapsed)
            .map(|n| tree.find(&n.id).map_or(0, |t| t.children.len()))
            .sum();
        prop_assert_eq!(out.edges.len(), expected);
        prop_assert_eq!(out.edges.len(), out.nodes.len() - 1);
    }

    #[test]
    fn leaves_stack_top_to_bottom_in_tree_order((tree, collapsed) in arb_case()) {
        let cfg = LayoutConfig::default();
        let out = layout(Some(&tree), &collapsed, &cfg);
        let leaf_ys: Vec<f64> = out
            .nodes
            .iter()
            .filter(|n| n.is_collapsed || !n.has_children)
            .map(|n| n.y)
            .collect();
        for (slot, y) in leaf_ys.iter().enumerate() {
            prop_assert_eq!(*y, slot as f64 * cfg.y_gap + cfg.y_offset);
        }
        prop_assert!(out.width >= cfg.min_canvas_width);
        prop_assert!(out.height >= cfg.min_canvas_height);
    }

    #[test]
    fn toggle_twice_restores_layout((tree, collapsed) in arb_case(), pick in any::<prop::sample::Index>()) {
        let cfg = LayoutConfig::default();
        let ids: Vec<String> = tree.iter().map(|(_, n)| n.id.clone()).collect();
        let id = pick.get(&ids);
        let before = layout(Some(&tree), &collapsed, &cfg);
        let mut state = collapsed.clone();
        state.toggle(id);
        state.toggle(id);
        prop_assert_eq!(&state, &collapsed);
        prop_assert_eq!(layout(Some(&tree), &state, &cfg), before);
    }

    #[test]
    fn seeded_layout_shows_depth_one_at_most(tree in arb_tree()) {
        let collapsed = CollapseState::seeded(&tree);
        let out = layout(Some(&tree), &collapsed, &LayoutConfig::default());
        prop_assert!(out.nodes.iter().all(|n| n.depth <= 1));
        prop_assert_eq!(out.nodes.len(), 1 + tree.children.len());
    }

    #[test]
    fn width_is_monotone_in_label_length(a in "[ -~]{0,80}", b in "[ -~]{0,80}", code in any::<bool>()) {
        let cfg = LayoutConfig::default();
        let kind = if code { NodeKind::Code } else { NodeKind::Child };
        let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
        prop_assert!(node_width(long, kind, &cfg) >= node_width(short, kind, &cfg));
        prop_assert!(node_width(short, kind, &cfg) >= 140.0);
    }
}
