// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-drawn field shapes.

use crate::models::analysis::AnalysisResult;
use crate::models::coords::{DisplayRing, LatLng, WireRing};
use crate::models::style::ShapeStyle;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shape identifier (`shape-<epoch millis>`), never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Circle,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Geometry of a finished draw or edit gesture, as reported by the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawnGeometry {
    Rectangle { ring: DisplayRing },
    Polygon { ring: DisplayRing },
    Circle { center: LatLng, radius_m: f64 },
}

impl DrawnGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            DrawnGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            DrawnGeometry::Polygon { .. } => ShapeKind::Polygon,
            DrawnGeometry::Circle { .. } => ShapeKind::Circle,
        }
    }
}

/// Center and radius of a circle shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub center: LatLng,
    pub radius_m: f64,
}

/// Area in hectares. Renders (and serializes) with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Hectares(f64);

impl Hectares {
    pub const ZERO: Hectares = Hectares(0.0);

    pub fn from_square_meters(square_meters: f64) -> Self {
        if !square_meters.is_finite() {
            return Self::ZERO;
        }
        Self((square_meters / 10_000.0).max(0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hectares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Hectares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One index reading; `-` until an analysis provides a value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndexValue(Option<f64>);

impl IndexValue {
    pub const PLACEHOLDER: &'static str = "-";

    pub fn new(value: Option<f64>) -> Self {
        Self(value.filter(|v| v.is_finite()))
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.2}", v),
            None => f.write_str(Self::PLACEHOLDER),
        }
    }
}

impl Serialize for IndexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The three indices shown for every shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FieldIndices {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub ndvi: IndexValue,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub evi: IndexValue,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub ndmi: IndexValue,
}

/// A drawn region and whatever the last analysis said about it.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Shape {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    id: ShapeId,
    kind: ShapeKind,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<[number, number]>"))]
    display_ring: DisplayRing,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<[number, number]>"))]
    wire_ring: WireRing,
    #[cfg_attr(feature = "binding-generation", ts(type = "{ center: [number, number]; radius_m: number } | null"))]
    circle: Option<CircleSpec>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    area_hectares: Hectares,
    indices: FieldIndices,
    health_classification: Option<String>,
    analysis: Option<AnalysisResult>,
    analyzed_at: Option<String>,
    style: ShapeStyle,
}

impl Shape {
    /// Build a fresh, unanalyzed shape. The wire ring is derived here.
    pub fn new(
        id: ShapeId,
        kind: ShapeKind,
        display_ring: DisplayRing,
        circle: Option<CircleSpec>,
        area_hectares: Hectares,
    ) -> Self {
        let wire_ring = display_ring.to_wire();
        Self {
            id,
            kind,
            display_ring,
            wire_ring,
            circle,
            area_hectares,
            indices: FieldIndices::default(),
            health_classification: None,
            analysis: None,
            analyzed_at: None,
            style: ShapeStyle::default(),
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn display_ring(&self) -> &DisplayRing {
        &self.display_ring
    }

    pub fn wire_ring(&self) -> &WireRing {
        &self.wire_ring
    }

    pub fn circle(&self) -> Option<&CircleSpec> {
        self.circle.as_ref()
    }

    pub fn area_hectares(&self) -> Hectares {
        self.area_hectares
    }

    pub fn indices(&self) -> &FieldIndices {
        &self.indices
    }

    pub fn health_classification(&self) -> Option<&str> {
        self.health_classification.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn analyzed_at(&self) -> Option<&str> {
        self.analyzed_at.as_deref()
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Replace the geometry after an edit. Analysis fields are kept.
    pub(crate) fn reshape(
        &mut self,
        display_ring: DisplayRing,
        circle: Option<CircleSpec>,
        area_hectares: Hectares,
    ) {
        self.wire_ring = display_ring.to_wire();
        self.display_ring = display_ring;
        self.circle = circle;
        self.area_hectares = area_hectares;
    }

    /// Overwrite every analysis-derived field at once.
    pub(crate) fn record_analysis(
        &mut self,
        indices: FieldIndices,
        result: AnalysisResult,
        style: ShapeStyle,
        analyzed_at: String,
    ) {
        self.indices = indices;
        self.health_classification = Some(result.health_status.clone());
        self.analysis = Some(result);
        self.style = style;
        self.analyzed_at = Some(analyzed_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hectares_format_two_decimals() {
        assert_eq!(Hectares::from_square_meters(113_516.0).to_string(), "11.35");
        assert_eq!(Hectares::ZERO.to_string(), "0.00");
        assert_eq!(Hectares::from_square_meters(-0.000001).to_string(), "0.00");
        assert_eq!(Hectares::from_square_meters(f64::NAN).to_string(), "0.00");
    }

    #[test]
    fn test_index_placeholder() {
        assert_eq!(IndexValue::default().to_string(), "-");
        assert_eq!(IndexValue::new(Some(0.7249)).to_string(), "0.72");
        assert_eq!(IndexValue::new(Some(f64::NAN)).to_string(), "-");
    }

    #[test]
    fn test_drawn_geometry_tagged_by_kind() {
        let json = r#"{"kind":"circle","center":[23.0,72.5],"radius_m":50.0}"#;
        let geometry: DrawnGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(geometry.kind(), ShapeKind::Circle);

        let json = r#"{"kind":"rectangle","ring":[[23.0,72.5],[23.1,72.5],[23.1,72.6]]}"#;
        let geometry: DrawnGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(geometry.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn test_new_shape_serializes_placeholders() {
        let ring = DisplayRing::new(vec![LatLng::new(1.0, 2.0)]);
        let shape = Shape::new(
            ShapeId::new("shape-1"),
            ShapeKind::Polygon,
            ring,
            None,
            Hectares::ZERO,
        );
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["id"], "shape-1");
        assert_eq!(json["kind"], "polygon");
        assert_eq!(json["area_hectares"], "0.00");
        assert_eq!(json["indices"]["ndvi"], "-");
        assert_eq!(json["wire_ring"][0][0], 2.0);
        assert!(json["health_classification"].is_null());
        assert!(json["circle"].is_null());
        assert!(json["analysis"].is_null());
    }
}
