// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field session: the state container the map front end talks to, and the
//! analysis flow that runs over it.

use crate::models::analysis::FieldConditions;
use crate::services::analysis::{AnalysisClient, AnalysisError};
use crate::services::visualization::{self, PanelSummary};
use crate::services::workspace::FieldWorkspace;
use crate::time_utils::format_utc_rfc3339;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Shape workspace plus the analysis client acting on it.
///
/// The workspace lock is never held while a request is outstanding, so the
/// map stays editable and concurrent analyses of one shape resolve
/// last-write-wins in arrival order.
pub struct FieldSession {
    workspace: Mutex<FieldWorkspace>,
    client: AnalysisClient,
    in_flight: AtomicUsize,
}

impl FieldSession {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            workspace: Mutex::new(FieldWorkspace::new()),
            client,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Lock the workspace for capture events or reads.
    pub async fn workspace(&self) -> MutexGuard<'_, FieldWorkspace> {
        self.workspace.lock().await
    }

    /// True while at least one analysis request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Analyze the selected (or newest) shape.
    ///
    /// Refused locally when no shape exists. On any failure the shape keeps
    /// its previous indices and health.
    pub async fn analyze(
        &self,
        crop_type: &str,
        field_data: Option<FieldConditions>,
    ) -> Result<PanelSummary, AnalysisError> {
        let (shape_id, request) = {
            let workspace = self.workspace.lock().await;
            workspace
                .analysis_request(crop_type)
                .ok_or(AnalysisError::NoShape)?
        };
        let request = request.with_field_data(field_data);

        let result = {
            let _loading = InFlight::enter(&self.in_flight);
            self.client.analyze(&request).await
        };

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(shape_id = %shape_id, error = %e, "Field analysis failed");
                return Err(e);
            }
        };

        let mut workspace = self.workspace.lock().await;
        let Some(shape) = workspace.get_mut(&shape_id) else {
            tracing::warn!(shape_id = %shape_id, "Shape deleted while analysis was running");
            return Err(AnalysisError::ShapeGone(shape_id));
        };

        visualization::apply_analysis(shape, result, format_utc_rfc3339(chrono::Utc::now()));
        tracing::info!(
            shape_id = %shape_id,
            status = shape.health_classification().unwrap_or_default(),
            "Field analysis applied"
        );
        Ok(visualization::panel_summary(shape))
    }
}

/// Keeps the in-flight count raised for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
