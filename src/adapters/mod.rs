//! External system adapters
//!
//! - [`analysis`] - HTTP client for the analysis API

pub mod analysis;
