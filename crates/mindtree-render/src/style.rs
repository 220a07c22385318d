use mindtree_core::NodeKind;

/// Visual treatment of one node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub corner_radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text_color: &'static str,
    pub font_family: &'static str,
    pub font_size: f64,
}

const SANS: &str = r#""trebuchet ms",verdana,arial,sans-serif"#;
const MONO: &str = r#"ui-monospace,"SFMono-Regular",menlo,consolas,monospace"#;

pub fn node_style(kind: NodeKind) -> NodeStyle {
    match kind {
        NodeKind::Root => NodeStyle {
            corner_radius: 14.0,
            fill: "hsl(240, 100%, 46.2745098039%)",
            stroke: "hsl(240, 60%, 30%)",
            text_color: "#ffffff",
            font_family: SANS,
            font_size: 14.0,
        },
        NodeKind::Child => NodeStyle {
            corner_radius: 8.0,
            fill: "hsl(240, 100%, 96%)",
            stroke: "hsl(240, 60%, 70%)",
            text_color: "#1b1b3a",
            font_family: SANS,
            font_size: 13.0,
        },
        NodeKind::Code => NodeStyle {
            corner_radius: 3.0,
            fill: "#1f2430",
            stroke: "#3b4252",
            text_color: "#e5e9f0",
            font_family: MONO,
            font_size: 12.0,
        },
    }
}

pub(crate) const ALL_KINDS: [NodeKind; 3] = [NodeKind::Root, NodeKind::Child, NodeKind::Code];
