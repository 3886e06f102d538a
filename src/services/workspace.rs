// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shape capture: turns draw / edit / delete events from the map surface
//! into [`Shape`] records and tracks the current selection.

use crate::models::analysis::AnalysisRequest;
use crate::models::coords::DisplayRing;
use crate::models::shape::{CircleSpec, DrawnGeometry, Hectares, Shape, ShapeId, ShapeKind};
use crate::services::area;
use crate::time_utils::ShapeIdGenerator;

/// Ordered shape collection plus at most one selected shape.
///
/// Single owner; callers that share it across tasks wrap it in a mutex.
#[derive(Debug, Default)]
pub struct FieldWorkspace {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    ids: ShapeIdGenerator,
}

impl FieldWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A draw gesture finished. The new shape becomes the selection.
    pub fn on_shape_created(&mut self, geometry: DrawnGeometry) -> &Shape {
        let id = self.ids.next_id();
        let kind = geometry.kind();
        let (display_ring, circle, area) = normalize(geometry);

        tracing::debug!(
            shape_id = %id,
            kind = kind.as_str(),
            vertices = display_ring.len(),
            area_ha = %area,
            "Shape created"
        );

        self.shapes
            .push(Shape::new(id.clone(), kind, display_ring, circle, area));
        self.selected = Some(id);
        let index = self.shapes.len() - 1;
        &self.shapes[index]
    }

    /// Vertices of an existing shape were edited. Rings and area are
    /// recomputed; the last analysis stays until the user re-analyzes.
    pub fn on_shape_edited(
        &mut self,
        id: &ShapeId,
        geometry: DrawnGeometry,
    ) -> Result<&Shape, CaptureError> {
        let shape = self
            .shapes
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| CaptureError::NotFound(id.clone()))?;

        let is_circle = shape.kind() == ShapeKind::Circle;
        if is_circle != (geometry.kind() == ShapeKind::Circle) {
            return Err(CaptureError::GeometryMismatch {
                expected: shape.kind(),
                got: geometry.kind(),
            });
        }

        let (display_ring, circle, area) = normalize(geometry);
        tracing::debug!(shape_id = %id, area_ha = %area, "Shape edited");
        shape.reshape(display_ring, circle, area);
        Ok(&*shape)
    }

    /// The map surface removed a layer.
    pub fn on_shape_deleted(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        let removed = self.shapes.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!(shape_id = %id, "Shape deleted");
        Some(removed)
    }

    /// Explicit removal from a list action. Same postconditions as
    /// [`FieldWorkspace::on_shape_deleted`].
    pub fn delete_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        self.on_shape_deleted(id)
    }

    /// The drawing layer was cleared.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    pub fn select(&mut self, id: &ShapeId) -> Result<&Shape, CaptureError> {
        let index = self
            .shapes
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| CaptureError::NotFound(id.clone()))?;
        self.selected = Some(id.clone());
        Ok(&self.shapes[index])
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn selected_id(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// The shape an analysis acts on: the selection, else the newest shape.
    pub fn analysis_target(&self) -> Option<&Shape> {
        self.selected().or_else(|| self.shapes.last())
    }

    /// Build the backend request for the current analysis target.
    pub fn analysis_request(&self, crop_type: &str) -> Option<(ShapeId, AnalysisRequest)> {
        let shape = self.analysis_target()?;
        let request = AnalysisRequest::new(shape.wire_ring().closed(), crop_type);
        Some((shape.id().clone(), request))
    }
}

/// Display ring, circle parameters and area for a drawn geometry.
fn normalize(geometry: DrawnGeometry) -> (DisplayRing, Option<CircleSpec>, Hectares) {
    let area = area::geometry_area(&geometry);
    match geometry {
        DrawnGeometry::Rectangle { ring } | DrawnGeometry::Polygon { ring } => (ring, None, area),
        DrawnGeometry::Circle { center, radius_m } => (
            area::circle_ring(center, radius_m),
            Some(CircleSpec { center, radius_m }),
            area,
        ),
    }
}

/// Errors from shape capture.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),

    #[error("Cannot apply {} geometry to a {} shape", .got.as_str(), .expected.as_str())]
    GeometryMismatch { expected: ShapeKind, got: ShapeKind },
}
