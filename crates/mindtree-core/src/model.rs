use crate::{Error, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deepest tree accepted by [`TreeNode::from_json_str`] and [`TreeNode::from_json_value`].
/// Deserialization recurses twice per tree level (the node object and its `children` array).
pub const MAX_JSON_TREE_DEPTH: usize = 128;

/// Node type tag. Only used for sizing and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    #[default]
    Child,
    Code,
}

impl NodeKind {
    /// Horizontal space reserved per label character.
    pub fn char_width(self) -> f64 {
        match self {
            NodeKind::Root | NodeKind::Child => 7.0,
            // Monospaced code labels need a little more room per glyph.
            NodeKind::Code => 7.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Child => "child",
            NodeKind::Code => "code",
        }
    }
}

/// One node of a mind map tree, in the JSON shape
/// `{ "id": ..., "label": ..., "type": "root"|"child"|"code", "children": [...] }`.
///
/// Ids must be unique across the whole tree; see [`TreeNode::validate`].
///
/// Trees read from JSON may nest at most [`MAX_JSON_TREE_DEPTH`] levels below the root; deeper
/// input fails with [`Error::TooDeep`]. Trees built in code have no such limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        check_nesting(text_nesting(text))?;
        // Nesting is bounded above, so serde_json's own (much lower) limit is not needed.
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let node = Self::deserialize(&mut de)?;
        de.end()?;
        Ok(node)
    }

    pub fn from_json_value(value: &Value) -> Result<Self> {
        check_nesting(value_nesting(value))?;
        Ok(Self::deserialize(value)?)
    }

    /// Pre-order, depth-first walk yielding `(depth, node)`; children are visited in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![(0, self)],
        }
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.iter().map(|(_, n)| n).find(|n| n.id == id)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Maximum depth below `self` (a lone node has depth 0).
    pub fn depth(&self) -> usize {
        self.iter().map(|(d, _)| d).max().unwrap_or(0)
    }

    /// Path of ids from `self` down to the node named `id`, both ends included.
    pub fn path_to(&self, id: &str) -> Option<Vec<&str>> {
        let mut path: Vec<&str> = Vec::new();
        for (depth, node) in self.iter() {
            path.truncate(depth);
            path.push(node.id.as_str());
            if node.id == id {
                return Some(path);
            }
        }
        None
    }

    /// Rejects trees where two nodes share an id. Collapse toggling keys off ids, so a
    /// duplicate would make toggles ambiguous.
    pub fn validate(&self) -> Result<()> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (_, node) in self.iter() {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

/// A tree `d` levels deep nests `2d + 1` JSON containers, `2d + 2` when the deepest node carries
/// an empty `children` array.
fn check_nesting(nesting: usize) -> Result<()> {
    if nesting > 2 * MAX_JSON_TREE_DEPTH + 2 {
        return Err(Error::TooDeep {
            max: MAX_JSON_TREE_DEPTH,
        });
    }
    Ok(())
}

/// Deepest `{`/`[` nesting in `text`, ignoring brackets inside strings. Malformed input is left
/// for the parser to report.
fn text_nesting(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for b in text.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

fn value_nesting(value: &Value) -> usize {
    let mut max = 0usize;
    let mut stack = vec![(1usize, value)];
    while let Some((depth, value)) = stack.pop() {
        match value {
            Value::Array(items) => {
                max = max.max(depth);
                stack.extend(items.iter().map(|v| (depth + 1, v)));
            }
            Value::Object(map) => {
                max = max.max(depth);
                stack.extend(map.values().map(|v| (depth + 1, v)));
            }
            _ => {}
        }
    }
    max
}
