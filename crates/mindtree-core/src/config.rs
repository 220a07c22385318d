use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spacing and sizing constants used by the layout engine.
///
/// Every field is optional when deserializing; missing fields keep their defaults, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between depth columns.
    pub x_gap: f64,
    /// Vertical distance between consecutive slots.
    pub y_gap: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub node_height: f64,
    pub min_node_width: f64,
    /// Horizontal padding added to the measured label width.
    pub label_padding: f64,
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,
    /// Extra room kept to the right of and below the furthest node.
    pub canvas_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_gap: 300.0,
            y_gap: 80.0,
            x_offset: 100.0,
            y_offset: 50.0,
            node_height: 50.0,
            min_node_width: 140.0,
            label_padding: 30.0,
            min_canvas_width: 800.0,
            min_canvas_height: 600.0,
            canvas_margin: 200.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_value(value: &Value) -> Result<Self> {
        let config = Self::deserialize(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("xGap", self.x_gap),
            ("yGap", self.y_gap),
            ("xOffset", self.x_offset),
            ("yOffset", self.y_offset),
            ("nodeHeight", self.node_height),
            ("minNodeWidth", self.min_node_width),
            ("labelPadding", self.label_padding),
            ("minCanvasWidth", self.min_canvas_width),
            ("minCanvasHeight", self.min_canvas_height),
            ("canvasMargin", self.canvas_margin),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("`{name}` must be a finite, non-negative number (got {v})"),
                });
            }
        }
        Ok(())
    }
}
