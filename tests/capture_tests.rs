// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shape capture lifecycle tests: create, edit, delete, select.

use fieldwatch::models::{DisplayRing, DrawnGeometry, LatLng, LngLat, ShapeKind};
use fieldwatch::services::{CaptureError, FieldWorkspace};
use std::collections::HashSet;

mod common;

fn assert_rings_mirror(display: &[LatLng], wire: &[LngLat]) {
    assert_eq!(display.len(), wire.len());
    for (d, w) in display.iter().zip(wire) {
        assert_eq!(d.lat, w.lat);
        assert_eq!(d.lng, w.lng);
    }
}

#[test]
fn test_create_rectangle() {
    let mut workspace = FieldWorkspace::new();
    let shape = workspace.on_shape_created(common::sample_rectangle());

    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert!(shape.id().as_str().starts_with("shape-"));
    assert_eq!(shape.indices().ndvi.to_string(), "-");
    assert_eq!(shape.indices().evi.to_string(), "-");
    assert_eq!(shape.indices().ndmi.to_string(), "-");
    assert!(shape.health_classification().is_none());
    assert_rings_mirror(shape.display_ring().points(), shape.wire_ring().points());

    let id = shape.id().clone();
    assert_eq!(workspace.selected().map(|s| s.id()), Some(&id));
}

#[test]
fn test_axis_swap_holds_for_every_kind() {
    let mut workspace = FieldWorkspace::new();
    workspace.on_shape_created(common::sample_rectangle());
    workspace.on_shape_created(DrawnGeometry::Polygon {
        ring: DisplayRing::new(vec![
            LatLng::new(-33.9, 18.4),
            LatLng::new(-33.8, 18.5),
            LatLng::new(-33.85, 18.6),
            LatLng::new(-33.95, 18.45),
            LatLng::new(-33.9, 18.4),
        ]),
    });
    workspace.on_shape_created(DrawnGeometry::Circle {
        center: LatLng::new(51.5, -0.12),
        radius_m: 300.0,
    });

    for shape in workspace.shapes() {
        assert!(shape.display_ring().len() >= 3);
        assert_rings_mirror(shape.display_ring().points(), shape.wire_ring().points());
    }
}

#[test]
fn test_edit_recomputes_area_and_keeps_id() {
    let mut workspace = FieldWorkspace::new();
    let shape = workspace.on_shape_created(common::sample_rectangle());
    let id = shape.id().clone();
    let before = shape.area_hectares();

    // Double the east-west extent
    let wider = DrawnGeometry::Rectangle {
        ring: DisplayRing::new(vec![
            LatLng::new(23.025, 72.570),
            LatLng::new(23.027, 72.570),
            LatLng::new(23.027, 72.580),
            LatLng::new(23.025, 72.580),
        ]),
    };
    let edited = workspace.on_shape_edited(&id, wider).unwrap();

    assert_eq!(edited.id(), &id);
    let ratio = edited.area_hectares().value() / before.value();
    assert!((ratio - 2.0).abs() < 0.01, "ratio was {}", ratio);
    assert_eq!(edited.wire_ring().points()[2], LngLat::new(72.580, 23.027));
    assert_rings_mirror(edited.display_ring().points(), edited.wire_ring().points());
}

#[test]
fn test_edit_unknown_shape() {
    let mut workspace = FieldWorkspace::new();
    let err = workspace
        .on_shape_edited(
            &fieldwatch::models::ShapeId::new("shape-0"),
            common::sample_rectangle(),
        )
        .unwrap_err();
    assert!(matches!(err, CaptureError::NotFound(_)));
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut workspace = FieldWorkspace::new();
    let first = workspace.on_shape_created(common::sample_rectangle()).id().clone();
    let second = workspace.on_shape_created(common::sample_rectangle()).id().clone();

    // Deleting an unselected shape keeps the selection
    assert!(workspace.on_shape_deleted(&first).is_some());
    assert_eq!(workspace.selected_id(), Some(&second));

    assert!(workspace.delete_shape(&second).is_some());
    assert!(workspace.selected_id().is_none());
    assert!(workspace.shapes().is_empty());

    // Gone for good
    assert!(workspace.delete_shape(&second).is_none());
    assert!(workspace.select(&second).is_err());
}

#[test]
fn test_ids_unique_across_bursts_and_deletes() {
    let mut workspace = FieldWorkspace::new();
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let id = workspace.on_shape_created(common::sample_rectangle()).id().clone();
        assert!(seen.insert(id.clone()), "Duplicate id {}", id);
        workspace.delete_shape(&id);
    }
}

#[test]
fn test_select_and_clear() {
    let mut workspace = FieldWorkspace::new();
    let first = workspace.on_shape_created(common::sample_rectangle()).id().clone();
    workspace.on_shape_created(common::sample_rectangle());

    workspace.select(&first).unwrap();
    assert_eq!(workspace.selected_id(), Some(&first));
    assert_eq!(workspace.analysis_target().map(|s| s.id()), Some(&first));

    workspace.clear();
    assert!(workspace.shapes().is_empty());
    assert!(workspace.selected().is_none());
    assert!(workspace.analysis_target().is_none());
}
