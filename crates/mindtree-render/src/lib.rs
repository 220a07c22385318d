#![forbid(unsafe_code)]

//! Headless SVG output for [`mindtree_core::MindmapLayout`].

pub mod style;
pub mod svg;
mod util;

pub use style::{NodeStyle, node_style};
pub use svg::{SvgRenderOptions, render_svg};
pub use util::sanitize_svg_id;
