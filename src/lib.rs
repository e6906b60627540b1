// Whisp - EUDR Geospatial Compliance Analysis Client
// Copyright (c) 2025 Whisp Contributors
// Licensed under the MIT License

//! # Whisp - EUDR Geospatial Compliance Analysis
//!
//! Whisp uploads plot geometries to a deforestation-risk analysis service
//! and turns the loosely structured answer into a results table, a styled
//! map overlay, and CSV and GeoJSON downloads for EU Deforestation
//! Regulation (EUDR) due diligence.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Geometry, styling, rendering, export, state and the analysis runner
//! - [`adapters`] - External integrations (the analysis API)
//! - [`domain`] - Payload decoding, resolved properties and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use whisp::core::export::{render_export, ExportFormat, ExportOptions};
//! use whisp::core::render::{MapOptions, MapOverlay, ResultsTable};
//! use whisp::domain::AnalysisPayload;
//! use serde_json::json;
//!
//! let payload = AnalysisPayload::new(json!({"data": {"features": [{
//!     "type": "Feature",
//!     "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]},
//!     "properties": {
//!         "plot_id": "P1",
//!         "country_name": "Indonesia",
//!         "overall_compliance": {"overall_risk": "high", "compliance_status": "non-compliant"}
//!     }
//! }]}}));
//!
//! let features = payload.features();
//! let table = ResultsTable::new(&features);
//! assert_eq!(table.len(), 1);
//!
//! let overlay = MapOverlay::build(&features, MapOptions::default());
//! assert_eq!(overlay.marker_count(), 1);
//!
//! let csv = render_export(&payload, ExportFormat::Csv, &ExportOptions::default()).unwrap();
//! assert!(csv.starts_with("ProducerName,"));
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`] with [`domain::WhispError`].
//! Structural mismatches in a payload are not errors: they yield an empty
//! feature list.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
