//! Core logic for Whisp.
//!
//! # Modules
//!
//! - [`geometry`] - Centroids and bounds of plot geometries
//! - [`style`] - Risk and compliance colors
//! - [`render`] - Results table, map overlay, tile layers and legend
//! - [`export`] - CSV and GeoJSON downloads
//! - [`state`] - Persisted session, preferences and analysis result
//! - [`handoff`] - Map viewer URLs carrying a payload
//! - [`analysis`] - Upload runner with an in-flight guard
//!
//! # Flow
//!
//! 1. **Analyze**: upload a file through [`analysis::AnalysisRunner`]
//! 2. **Persist**: the payload is stored as the current analysis
//! 3. **Normalize**: features are extracted and resolved once per feature
//! 4. **Render**: table rows, styled paths and centroid markers
//! 5. **Export**: CSV and GeoJSON downloads

pub mod analysis;
pub mod export;
pub mod geometry;
pub mod handoff;
pub mod render;
pub mod state;
pub mod style;
