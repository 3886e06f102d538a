// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the external field analysis endpoint.

use crate::models::coords::LngLat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Field conditions the backend's crop-health model accepts in place of its
/// built-in defaults. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_ph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
}

impl FieldConditions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// `POST /analyze-farm` body.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    /// Exactly one closed ring, longitude first
    pub coordinates: Vec<Vec<LngLat>>,
    pub crop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_data: Option<FieldConditions>,
}

impl AnalysisRequest {
    pub fn new(ring: Vec<LngLat>, crop_type: impl Into<String>) -> Self {
        Self {
            coordinates: vec![ring],
            crop_type: crop_type.into(),
            field_data: None,
        }
    }

    pub fn with_field_data(mut self, field_data: Option<FieldConditions>) -> Self {
        self.field_data = field_data.filter(|f| !f.is_empty());
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinates.iter().map(Vec::len).sum()
    }
}

/// Response body exactly as the backend sends it; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawAnalysisResponse {
    pub indices: Option<BTreeMap<String, Option<f64>>>,
    pub health_status: Option<String>,
    pub healthy_range: Option<String>,
    pub zone_type: Option<String>,
    /// Kept loose so an unreadable bundle can be dropped on its own
    pub crop_health: Option<serde_json::Value>,
    pub error: Option<String>,
}

/// Named index values returned by the backend (NDVI, EVI, MSI, ...).
/// Missing or non-finite values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpectralIndices(BTreeMap<String, f64>);

impl SpectralIndices {
    pub fn from_raw(raw: BTreeMap<String, Option<f64>>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(name, value)| {
                    value
                        .filter(|v| v.is_finite())
                        .map(|v| (name.to_ascii_uppercase(), v))
                })
                .collect(),
        )
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(&name.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// ML crop-health prediction attached to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CropHealth {
    pub prediction: String,
    pub confidence: f64,
    pub healthy_prob: f64,
    pub unhealthy_prob: f64,
    /// Model inputs the backend estimated; missing or non-finite ones dropped
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, number>"))]
    pub estimated_inputs: BTreeMap<String, f64>,
}

/// `crop_health` as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCropHealth {
    pub prediction: String,
    pub confidence: f64,
    pub healthy_prob: f64,
    pub unhealthy_prob: f64,
    #[serde(default)]
    pub estimated_inputs: BTreeMap<String, Option<f64>>,
}

impl From<RawCropHealth> for CropHealth {
    fn from(raw: RawCropHealth) -> Self {
        Self {
            prediction: raw.prediction,
            confidence: raw.confidence,
            healthy_prob: raw.healthy_prob,
            unhealthy_prob: raw.unhealthy_prob,
            estimated_inputs: raw
                .estimated_inputs
                .into_iter()
                .filter_map(|(name, value)| value.filter(|v| v.is_finite()).map(|v| (name, v)))
                .collect(),
        }
    }
}

impl CropHealth {
    /// Whether the probabilities look like a distribution.
    pub fn is_consistent(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.confidence)
            && in_unit(self.healthy_prob)
            && in_unit(self.unhealthy_prob)
            && ((self.healthy_prob + self.unhealthy_prob) - 1.0).abs() <= 0.05
    }
}

/// Validated analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalysisResult {
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, number>"))]
    pub indices: SpectralIndices,
    pub health_status: String,
    pub healthy_range: Option<String>,
    pub zone_type: Option<String>,
    pub crop_health: Option<CropHealth>,
}
