// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coordinate conventions.
//!
//! The map surface speaks latitude-first ([`LatLng`]), the analysis backend
//! and GeoJSON speak longitude-first ([`LngLat`]). Keeping them as separate
//! types means a ring can only cross between the two through an explicit
//! axis swap.

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Display-order point, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Wire-order point, serialized as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

impl From<LatLng> for LngLat {
    fn from(p: LatLng) -> Self {
        Self {
            lng: p.lng,
            lat: p.lat,
        }
    }
}

impl From<LngLat> for LatLng {
    fn from(p: LngLat) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

impl From<LngLat> for Coord<f64> {
    fn from(p: LngLat) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

/// Vertices in the order the user drew them, latitude first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayRing(Vec<LatLng>);

/// The same vertices as a [`DisplayRing`], longitude first.
///
/// Only obtainable from [`DisplayRing::to_wire`], so the two never drift.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireRing(Vec<LngLat>);

impl DisplayRing {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Swap axes point by point.
    pub fn to_wire(&self) -> WireRing {
        WireRing(self.0.iter().copied().map(LngLat::from).collect())
    }
}

impl WireRing {
    pub fn points(&self) -> &[LngLat] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Vertices with the first one repeated at the end, as GeoJSON requires.
    pub fn closed(&self) -> Vec<LngLat> {
        let mut points = self.0.clone();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if first != last {
                points.push(first);
            }
        }
        points
    }

    /// Number of vertices, not counting a closing duplicate.
    pub fn distinct_vertex_count(&self) -> usize {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() > 1 && first == last => self.0.len() - 1,
            _ => self.0.len(),
        }
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self.0.iter().copied().map(Coord::from).collect();
        Polygon::new(LineString::from(coords), vec![])
    }
}
