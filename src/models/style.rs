// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map layer styling for drawn shapes.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stroke color of a freshly drawn, not yet analyzed shape.
pub const DRAW_COLOR: &str = "#3388ff";

/// Display color chosen from an analysis health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum HealthColor {
    Green,
    Yellow,
    Red,
    Brown,
    Gray,
}

impl HealthColor {
    pub fn hex(self) -> &'static str {
        match self {
            HealthColor::Green => "#22c55e",
            HealthColor::Yellow => "#eab308",
            HealthColor::Red => "#ef4444",
            HealthColor::Brown => "#92400e",
            HealthColor::Gray => "#6b7280",
        }
    }
}

/// Stroke/fill style applied to a shape's layer on the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShapeStyle {
    /// Health color once analyzed; `None` while the shape still has the draw style
    pub health_color: Option<HealthColor>,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: u32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            health_color: None,
            color: DRAW_COLOR.to_string(),
            fill_color: DRAW_COLOR.to_string(),
            fill_opacity: 0.2,
            weight: 3,
        }
    }
}

impl ShapeStyle {
    pub fn for_health(color: HealthColor) -> Self {
        Self {
            health_color: Some(color),
            color: color.hex().to_string(),
            fill_color: color.hex().to_string(),
            fill_opacity: 0.4,
            weight: 3,
        }
    }
}
