// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the external field analysis endpoint.
//!
//! Handles:
//! - Posting one closed wire-order ring plus a crop type
//! - Reading bare `NaN`/`Infinity` tokens the backend emits for empty masks
//! - Separating transport failures from errors the backend reports itself
//!
//! Each call is a single attempt; retrying is up to the user.

use crate::models::analysis::{
    AnalysisRequest, AnalysisResult, CropHealth, RawAnalysisResponse, RawCropHealth,
    SpectralIndices,
};
use crate::models::shape::ShapeId;
use std::borrow::Cow;
use std::time::Duration;

/// Path of the analysis route under the configured base URL.
pub const ANALYZE_PATH: &str = "/analyze-farm";

/// Analysis API client.
#[derive(Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    /// Create a client for `base_url`. `timeout: None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AnalysisError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one polygon for analysis.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!(
            crop_type = %request.crop_type,
            vertices = request.vertex_count(),
            "Requesting field analysis"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // The backend wraps its own failures as {"error": "..."}.
            if let Some(message) = parse_body(&body).ok().and_then(|raw| raw.error) {
                tracing::warn!(status = status.as_u16(), error = %message, "Analysis backend reported an error");
                return Err(AnalysisError::ServerReported(message));
            }
            tracing::warn!(status = status.as_u16(), "Analysis request failed");
            return Err(AnalysisError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let raw = parse_body(&body)
            .map_err(|e| AnalysisError::InvalidResponse(format!("JSON parse error: {}", e)))?;
        validate(raw)
    }
}

fn parse_body(body: &str) -> Result<RawAnalysisResponse, serde_json::Error> {
    serde_json::from_str(&sanitize_non_finite(body))
}

/// Turn a raw response into a result, rejecting ones missing required fields.
pub(crate) fn validate(raw: RawAnalysisResponse) -> Result<AnalysisResult, AnalysisError> {
    if let Some(message) = raw.error {
        return Err(AnalysisError::ServerReported(message));
    }

    let indices = raw
        .indices
        .ok_or_else(|| AnalysisError::InvalidResponse("missing 'indices'".to_string()))?;
    let health_status = raw
        .health_status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AnalysisError::InvalidResponse("missing 'health_status'".to_string()))?;

    // The bundle is optional; an unreadable one must not sink the indices.
    let crop_health = raw.crop_health.and_then(|value| {
        match serde_json::from_value::<RawCropHealth>(value) {
            Ok(bundle) => Some(CropHealth::from(bundle)),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unreadable crop health bundle");
                None
            }
        }
    });

    if let Some(crop_health) = &crop_health {
        if !crop_health.is_consistent() {
            tracing::warn!(
                confidence = crop_health.confidence,
                healthy_prob = crop_health.healthy_prob,
                unhealthy_prob = crop_health.unhealthy_prob,
                "Crop health probabilities out of range"
            );
        }
    }

    Ok(AnalysisResult {
        indices: SpectralIndices::from_raw(indices),
        health_status,
        healthy_range: raw.healthy_range,
        zone_type: raw.zone_type,
        crop_health,
    })
}

/// Replace bare `NaN`, `Infinity` and `-Infinity` tokens outside of strings
/// with `null`, since strict JSON parsers reject them.
pub(crate) fn sanitize_non_finite(body: &str) -> Cow<'_, str> {
    if !body.contains("NaN") && !body.contains("Infinity") {
        return Cow::Borrowed(body);
    }

    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Errors from a field analysis attempt. None of them touch shape state.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Please draw a field boundary first")]
    NoShape,

    #[error("Analysis service unreachable: {0}")]
    Transport(String),

    #[error("{0}")]
    ServerReported(String),

    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),

    #[error("Shape {0} was deleted before the analysis finished")]
    ShapeGone(ShapeId),
}
