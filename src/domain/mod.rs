//! Domain models and types for Whisp.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Payload decoding** ([`AnalysisPayload`], [`PayloadShape`], [`Feature`])
//! - **Property resolution** ([`ResolvedProperties`], [`RiskLevel`], [`ComplianceStatus`])
//! - **Country codes** ([`country::to_iso2`])
//! - **Error types** ([`WhispError`], [`AnalysisError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use whisp::domain::{AnalysisPayload, ResolvedProperties};
//! use serde_json::json;
//!
//! let payload = AnalysisPayload::new(json!({"data": {"features": [
//!     {"properties": {"plot_id": "P1", "country_name": "Indonesia"}}
//! ]}}));
//!
//! for (index, feature) in payload.features().iter().enumerate() {
//!     let props = ResolvedProperties::resolve(feature, index);
//!     assert_eq!(props.plot_id.to_string(), "P1");
//! }
//! ```

pub mod country;
pub mod errors;
pub mod payload;
pub mod properties;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{AnalysisError, WhispError};
pub use payload::{extract_features, AnalysisPayload, Feature, PayloadShape};
pub use properties::{resolve_all, ComplianceStatus, PlotId, ResolvedProperties, RiskLevel};
pub use result::Result;
