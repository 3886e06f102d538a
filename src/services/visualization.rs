// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Maps analysis results onto the map layer and the side panel.

use crate::models::analysis::{AnalysisResult, CropHealth};
use crate::models::shape::{FieldIndices, IndexValue, Shape, ShapeId, ShapeKind};
use crate::models::style::{HealthColor, ShapeStyle};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shown when the backend did not describe the healthy band for the crop.
pub const DEFAULT_HEALTHY_RANGE: &str = "NDVI > 0.7";

/// Pick a display color for a health classification.
///
/// Rules are tried in order on a case-insensitive substring match; the first
/// hit wins. "healthy" inside "unhealthy" does not count as healthy.
pub fn color_for_status(status: &str) -> HealthColor {
    let status = status.to_lowercase();
    let unhealthy = status.contains("unhealthy");

    if status.contains("healthy") && !unhealthy {
        HealthColor::Green
    } else if status.contains("moderate") {
        HealthColor::Yellow
    } else if unhealthy || status.contains("stress") {
        HealthColor::Red
    } else if status.contains("bare") {
        HealthColor::Brown
    } else {
        HealthColor::Gray
    }
}

/// The indices every shape shows, taken from a full analysis result.
///
/// NDMI is read directly when returned, otherwise derived from the moisture
/// stress index as (1 - MSI) / (1 + MSI).
pub fn field_indices(result: &AnalysisResult) -> FieldIndices {
    let ndmi = result.indices.get("NDMI").or_else(|| {
        result
            .indices
            .get("MSI")
            .filter(|msi| (1.0 + msi).abs() > f64::EPSILON)
            .map(|msi| (1.0 - msi) / (1.0 + msi))
    });

    FieldIndices {
        ndvi: IndexValue::new(result.indices.get("NDVI")),
        evi: IndexValue::new(result.indices.get("EVI")),
        ndmi: IndexValue::new(ndmi),
    }
}

/// Apply an analysis to one shape: indices, health, style. Other shapes are
/// untouched since only this record is borrowed.
pub fn apply_analysis(shape: &mut Shape, result: AnalysisResult, analyzed_at: String) {
    let color = color_for_status(&result.health_status);
    let indices = field_indices(&result);

    tracing::debug!(
        shape_id = %shape.id(),
        status = %result.health_status,
        color = ?color,
        "Applying analysis to shape"
    );

    shape.record_analysis(indices, result, ShapeStyle::for_health(color), analyzed_at);
}

/// Index kinds shown on the panel, with the dashboard's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Ndvi,
    Evi,
    Ndmi,
}

impl IndexKind {
    /// (good, moderate) lower bounds.
    fn thresholds(self) -> (f64, f64) {
        match self {
            IndexKind::Ndvi | IndexKind::Evi => (0.7, 0.5),
            IndexKind::Ndmi => (0.4, 0.3),
        }
    }

    pub fn band(self, value: IndexValue) -> Option<IndexBand> {
        let value = value.value()?;
        let (good, moderate) = self.thresholds();
        Some(if value >= good {
            IndexBand::Good
        } else if value >= moderate {
            IndexBand::Moderate
        } else {
            IndexBand::Critical
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum IndexBand {
    Good,
    Moderate,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct IndexBands {
    pub ndvi: Option<IndexBand>,
    pub evi: Option<IndexBand>,
    pub ndmi: Option<IndexBand>,
}

/// Side-panel view of one shape.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PanelSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub shape_id: ShapeId,
    pub kind: ShapeKind,
    pub area_hectares: String,
    pub ndvi: String,
    pub evi: String,
    pub ndmi: String,
    pub bands: IndexBands,
    pub health_status: Option<String>,
    pub healthy_range: Option<String>,
    pub zone_type: Option<String>,
    pub crop_health: Option<CropHealth>,
    pub color: Option<HealthColor>,
    pub analyzed_at: Option<String>,
}

pub fn panel_summary(shape: &Shape) -> PanelSummary {
    let indices = shape.indices();
    let analysis = shape.analysis();

    PanelSummary {
        shape_id: shape.id().clone(),
        kind: shape.kind(),
        area_hectares: shape.area_hectares().to_string(),
        ndvi: indices.ndvi.to_string(),
        evi: indices.evi.to_string(),
        ndmi: indices.ndmi.to_string(),
        bands: IndexBands {
            ndvi: IndexKind::Ndvi.band(indices.ndvi),
            evi: IndexKind::Evi.band(indices.evi),
            ndmi: IndexKind::Ndmi.band(indices.ndmi),
        },
        health_status: shape.health_classification().map(str::to_string),
        healthy_range: analysis.map(|a| {
            a.healthy_range
                .clone()
                .unwrap_or_else(|| DEFAULT_HEALTHY_RANGE.to_string())
        }),
        zone_type: analysis.and_then(|a| a.zone_type.clone()),
        crop_health: analysis.and_then(|a| a.crop_health.clone()),
        color: shape.style().health_color,
        analyzed_at: shape.analyzed_at().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::SpectralIndices;
    use std::collections::BTreeMap;

    fn result_with(indices: &[(&str, f64)]) -> AnalysisResult {
        let raw: BTreeMap<String, Option<f64>> = indices
            .iter()
            .map(|(k, v)| (k.to_string(), Some(*v)))
            .collect();
        AnalysisResult {
            indices: SpectralIndices::from_raw(raw),
            health_status: "Healthy".to_string(),
            healthy_range: None,
            zone_type: None,
            crop_health: None,
        }
    }

    #[test]
    fn test_ndmi_derived_from_msi() {
        let indices = field_indices(&result_with(&[("NDVI", 0.72), ("MSI", 0.3)]));
        // (1 - 0.3) / 1.3 = 0.538
        assert_eq!(indices.ndmi.to_string(), "0.54");
        assert_eq!(indices.evi.to_string(), "-");
    }

    #[test]
    fn test_returned_ndmi_preferred() {
        let indices = field_indices(&result_with(&[("NDMI", 0.41), ("MSI", 0.3)]));
        assert_eq!(indices.ndmi.to_string(), "0.41");
    }

    #[test]
    fn test_index_bands() {
        assert_eq!(
            IndexKind::Ndvi.band(IndexValue::new(Some(0.72))),
            Some(IndexBand::Good)
        );
        assert_eq!(
            IndexKind::Evi.band(IndexValue::new(Some(0.55))),
            Some(IndexBand::Moderate)
        );
        assert_eq!(
            IndexKind::Ndmi.band(IndexValue::new(Some(0.35))),
            Some(IndexBand::Moderate)
        );
        assert_eq!(
            IndexKind::Ndmi.band(IndexValue::new(Some(0.1))),
            Some(IndexBand::Critical)
        );
        assert_eq!(IndexKind::Ndvi.band(IndexValue::default()), None);
    }
}
