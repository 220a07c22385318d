use mindtree_core::{Error, LayoutConfig, MindmapSession, NodeKind, ToggleHandler, TreeNode};
use std::path::PathBuf;

fn fixture(name: &str) -> TreeNode {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("mindmap")
        .join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    TreeNode::from_json_str(&text).expect("fixture parses")
}

fn visible(session: &MindmapSession) -> Vec<&str> {
    session.layout().nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn new_session_has_empty_canvas() {
    let session = MindmapSession::default();
    assert!(session.tree().is_none());
    assert!(session.layout().is_empty());
    assert_eq!(session.layout().width, 800.0);
    assert_eq!(session.layout().height, 600.0);
}

#[test]
fn load_seeds_and_lays_out() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    assert_eq!(visible(&session), vec!["root", "moves", "borrowing", "drop"]);
    assert_eq!(
        session.collapsed().iter().collect::<Vec<_>>(),
        vec!["borrow-unique", "borrowing", "moves"]
    );
}

#[test]
fn toggle_relayouts_and_round_trips() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    let before = session.layout().clone();

    assert!(session.toggle("borrowing"));
    assert_eq!(
        visible(&session),
        vec!["root", "moves", "borrowing", "borrow-shared", "borrow-unique", "drop"]
    );
    assert!(session.layout().node("borrow-unique").unwrap().is_collapsed);

    assert!(session.toggle("borrowing"));
    assert_eq!(session.layout(), &before);
}

#[test]
fn toggle_on_leaf_or_unknown_id_is_a_no_op() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    let collapsed = session.collapsed().clone();

    assert!(!session.toggle("drop"));
    assert!(!session.toggle("does-not-exist"));
    assert_eq!(session.collapsed(), &collapsed);

    let mut empty = MindmapSession::default();
    assert!(!empty.toggle("root"));
}

#[test]
fn on_toggle_dispatches_to_toggle() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    let handler: &mut dyn ToggleHandler = &mut session;
    assert!(handler.on_toggle("moves"));
    assert!(session.layout().node("moves-copy").is_some());
}

#[test]
fn loading_a_new_tree_replaces_collapse_state() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    session.toggle("moves");

    let other = TreeNode::new("moves", "Reused id", NodeKind::Root).with_child(
        TreeNode::new("k", "K", NodeKind::Child)
            .with_child(TreeNode::new("k1", "K1", NodeKind::Child)),
    );
    session.load(other).unwrap();
    assert_eq!(session.collapsed().iter().collect::<Vec<_>>(), vec!["k"]);
    assert_eq!(visible(&session), vec!["moves", "k"]);
}

#[test]
fn duplicate_ids_are_rejected_and_state_kept() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();
    let before = session.layout().clone();

    let err = session.load(fixture("duplicate_ids.json")).unwrap_err();
    assert!(matches!(err, Error::DuplicateId { ref id } if id == "x"));
    assert_eq!(session.layout(), &before);
    assert_eq!(session.tree().map(|t| t.id.as_str()), Some("root"));
}

#[test]
fn expand_collapse_and_reveal() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();

    session.expand_all();
    assert_eq!(session.layout().nodes.len(), 9);

    session.collapse_all();
    assert_eq!(visible(&session), vec!["root"]);

    assert!(session.reveal("borrow-unique-example"));
    assert!(session.layout().node("borrow-unique-example").is_some());
    assert!(session.layout().node("moves-copy").is_none());
    assert!(!session.reveal("nope"));
}

#[test]
fn clear_and_config_changes_relayout() {
    let mut session = MindmapSession::default();
    session.load(fixture("basic.json")).unwrap();

    let cfg = LayoutConfig {
        x_gap: 200.0,
        ..LayoutConfig::default()
    };
    session.set_config(cfg).unwrap();
    assert_eq!(session.layout().node("moves").unwrap().x, 300.0);

    let bad = LayoutConfig {
        y_gap: f64::NAN,
        ..LayoutConfig::default()
    };
    assert!(session.set_config(bad).is_err());
    assert_eq!(session.config().x_gap, 200.0);

    session.clear();
    assert!(session.tree().is_none());
    assert!(session.layout().is_empty());
}
