#![forbid(unsafe_code)]

//! Layout and interaction engine for collapsible, left-to-right mind maps.
//!
//! A [`TreeNode`] tree plus a [`CollapseState`] go into [`layout`]; out comes a
//! [`MindmapLayout`] with positioned boxes, connector anchors and a canvas size. The
//! [`MindmapSession`] keeps the three together for interactive use and recomputes the layout on
//! every toggle.

pub mod collapse;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod session;
pub mod sizing;

pub use collapse::CollapseState;
pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use layout::{LayoutEdge, MindmapLayout, PositionedNode, layout};
pub use model::{MAX_JSON_TREE_DEPTH, NodeKind, TreeNode};
pub use session::{MindmapSession, ToggleHandler};
