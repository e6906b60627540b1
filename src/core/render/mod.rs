//! Renderers for analysis results
//!
//! - [`table`] - paginated tabular view and feature details
//! - [`map`] - styled map overlay with centroid markers
//! - [`layers`] - base/overlay tile layers and the legend

pub mod layers;
pub mod map;
pub mod table;

pub use layers::{legend, LayerCatalog};
pub use map::{marker_size, MapOptions, MapOverlay};
pub use table::{feature_details, ResultsTable};
