use crate::config::LayoutConfig;
use crate::model::NodeKind;

/// Label length as the rendering surface counts it (UTF-16 code units).
pub fn label_len(label: &str) -> usize {
    label.encode_utf16().count()
}

/// Box width for a label: `max(min_node_width, len * char_width + label_padding)`.
pub fn node_width(label: &str, kind: NodeKind, config: &LayoutConfig) -> f64 {
    let text_w = label_len(label) as f64 * kind.char_width() + config.label_padding;
    text_w.max(config.min_node_width)
}

pub fn half_width(label: &str, kind: NodeKind, config: &LayoutConfig) -> f64 {
    node_width(label, kind, config) / 2.0
}

/// Box height; identical for every kind.
pub fn node_height(config: &LayoutConfig) -> f64 {
    config.node_height
}
