use crate::style::{ALL_KINDS, node_style};
use crate::util::{escape_xml, escape_xml_into, fmt_display, fmt_into, sanitize_svg_id};
use mindtree_core::{LayoutEdge, MindmapLayout, PositionedNode};
use std::fmt::Write as _;

/// Radius of the expand/collapse glyph drawn on the right edge of parent nodes.
const TOGGLE_RADIUS: f64 = 9.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes every CSS rule so several maps can share a page.
    pub diagram_id: String,
    /// Draw the expand/collapse glyph on nodes that own children.
    pub show_toggles: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: "mindmap".to_string(),
            show_toggles: true,
        }
    }
}

/// Renders a computed layout as a standalone SVG document.
///
/// Toggle glyphs carry `data-toggle="<node id>"`; a host maps clicks on them back to
/// [`mindtree_core::ToggleHandler::on_toggle`].
pub fn render_svg(layout: &MindmapLayout, options: &SvgRenderOptions) -> String {
    let id = sanitize_svg_id(&options.diagram_id);
    let mut out = String::with_capacity(1024 + layout.nodes.len() * 320);

    let w = fmt_display(layout.width);
    let h = fmt_display(layout.height);
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="mindmap">"#
    );
    out.push_str("<style>");
    out.push_str(&mindmap_css(&id));
    out.push_str("</style>");

    out.push_str(r#"<g class="edges">"#);
    for edge in &layout.edges {
        render_edge(&mut out, edge);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &layout.nodes {
        render_node(&mut out, node, options.show_toggles);
    }
    out.push_str("</g></svg>");

    tracing::trace!(
        diagram_id = %id,
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        bytes = out.len(),
        "mind map svg rendered"
    );
    out
}

fn mindmap_css(id: &str) -> String {
    let mut css = String::new();
    let _ = write!(
        &mut css,
        "#{id} .edge{{fill:none;stroke:hsl(240, 30%, 60%);stroke-width:2;}}"
    );
    let _ = write!(
        &mut css,
        "#{id} .node text{{text-anchor:middle;dominant-baseline:central;}}"
    );
    for kind in ALL_KINDS {
        let s = node_style(kind);
        let k = kind.as_str();
        let _ = write!(
            &mut css,
            "#{id} .node-{k} rect{{fill:{};stroke:{};stroke-width:1.5;}}",
            s.fill, s.stroke
        );
        let _ = write!(
            &mut css,
            "#{id} .node-{k} text{{fill:{};font-family:{};font-size:{}px;}}",
            s.text_color,
            s.font_family,
            fmt_display(s.font_size)
        );
    }
    let _ = write!(
        &mut css,
        "#{id} .toggle{{cursor:pointer;}}#{id} .toggle circle{{fill:#ffffff;stroke:hsl(240, 30%, 45%);stroke-width:1.5;}}#{id} .toggle text{{fill:hsl(240, 30%, 30%);font-family:sans-serif;font-size:14px;}}"
    );
    let _ = write!(&mut css, "#{id} .collapsed rect{{stroke-dasharray:4 3;}}");
    css
}

/// Cubic Bézier from the parent's right edge to the child's left edge.
fn render_edge(out: &mut String, edge: &LayoutEdge) {
    let ((c1x, c1y), (c2x, c2y)) = edge.curve();
    let _ = write!(out, r#"<path class="edge edge-depth-{}" data-from=""#, edge.depth);
    escape_xml_into(out, &edge.from);
    out.push_str(r#"" data-to=""#);
    escape_xml_into(out, &edge.to);
    out.push_str(r#"" d="M"#);
    fmt_into(out, edge.x1);
    out.push(',');
    fmt_into(out, edge.y1);
    out.push('C');
    let ctrl = [c1x, c1y, c2x, c2y, edge.x2, edge.y2];
    for (i, v) in ctrl.into_iter().enumerate() {
        if i > 0 {
            out.push(if i % 2 == 1 { ',' } else { ' ' });
        }
        fmt_into(out, v);
    }
    out.push_str(r#""/>"#);
}

fn render_node(out: &mut String, node: &PositionedNode, show_toggles: bool) {
    let style = node_style(node.kind);
    let hw = node.half_width();
    let hh = node.height / 2.0;

    let _ = write!(out, r#"<g class="node node-{}"#, node.kind.as_str());
    if node.is_collapsed {
        out.push_str(" collapsed");
    }
    let _ = write!(
        out,
        r#"" data-id="{}" data-depth="{}" transform="translate({}, {})">"#,
        escape_xml(&node.id),
        node.depth,
        fmt_display(node.x),
        fmt_display(node.y)
    );
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"/>"#,
        fmt_display(-hw),
        fmt_display(-hh),
        fmt_display(node.width),
        fmt_display(node.height),
        r = fmt_display(style.corner_radius),
    );
    out.push_str(r#"<text x="0" y="0">"#);
    escape_xml_into(out, &node.label);
    out.push_str("</text>");

    if show_toggles && node.has_children {
        let glyph = if node.is_collapsed { "+" } else { "\u{2212}" };
        let _ = write!(
            out,
            r#"<g class="toggle" data-toggle="{}" transform="translate({}, 0)"><circle r="{}"/><text x="0" y="0">{glyph}</text></g>"#,
            escape_xml(&node.id),
            fmt_display(hw),
            fmt_display(TOGGLE_RADIUS)
        );
    }
    out.push_str("</g>");
}
