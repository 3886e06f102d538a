// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fieldwatch: field boundary capture and crop health analysis
//!
//! This crate turns field boundaries drawn on a satellite map into shape
//! records with geodesic area, submits them to an external vegetation
//! analysis service, and maps the results back onto the map and side panel.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{FieldSession, GeocodingClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: FieldSession,
    pub geocoder: GeocodingClient,
}
