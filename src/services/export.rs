// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON export of drawn shapes.

use crate::models::shape::Shape;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

/// Export shapes as a FeatureCollection in collection order. Rings are in
/// wire order and closed; `exported_at` is attached as a foreign member.
pub fn export_shapes(shapes: &[Shape], exported_at: &str) -> FeatureCollection {
    let features = shapes.iter().map(shape_feature).collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "exported_at".to_string(),
        JsonValue::String(exported_at.to_string()),
    );

    tracing::debug!(count = shapes.len(), "Exporting shapes");

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

fn shape_feature(shape: &Shape) -> Feature {
    let polygon = shape.wire_ring().to_polygon();

    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), JsonValue::from(shape.kind().as_str()));
    properties.insert(
        "area_ha".to_string(),
        JsonValue::from(shape.area_hectares().to_string()),
    );
    let indices = shape.indices();
    properties.insert("ndvi".to_string(), JsonValue::from(indices.ndvi.to_string()));
    properties.insert("evi".to_string(), JsonValue::from(indices.evi.to_string()));
    properties.insert("ndmi".to_string(), JsonValue::from(indices.ndmi.to_string()));
    properties.insert(
        "health_status".to_string(),
        shape
            .health_classification()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
    );
    if let Some(circle) = shape.circle() {
        properties.insert("radius_m".to_string(), JsonValue::from(circle.radius_m));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&polygon))),
        id: Some(Id::String(shape.id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}
