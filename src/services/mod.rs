// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - field capture and analysis logic.

pub mod analysis;
pub mod area;
pub mod export;
pub mod geocode;
pub mod session;
pub mod visualization;
pub mod workspace;

pub use analysis::{AnalysisClient, AnalysisError};
pub use geocode::{GeocodingClient, GeocodingError};
pub use session::FieldSession;
pub use visualization::{color_for_status, PanelSummary};
pub use workspace::{CaptureError, FieldWorkspace};
