// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analysis;
pub mod coords;
pub mod shape;
pub mod style;

pub use analysis::{AnalysisRequest, AnalysisResult, CropHealth, FieldConditions, SpectralIndices};
pub use coords::{DisplayRing, LatLng, LngLat, WireRing};
pub use shape::{
    CircleSpec, DrawnGeometry, FieldIndices, Hectares, IndexValue, Shape, ShapeId, ShapeKind,
};
pub use style::{HealthColor, ShapeStyle};
