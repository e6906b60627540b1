//! Analysis API adapter
//!
//! [`AnalysisApi`] is the seam between the analysis runner and the remote
//! service; [`HttpAnalysisClient`] is the production implementation.

pub mod client;
pub mod upload;

pub use client::HttpAnalysisClient;
pub use upload::UploadFile;

use crate::domain::{AnalysisPayload, Result};
use async_trait::async_trait;

/// Remote analysis of an uploaded plot file
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Upload a file and return the analysis result
    async fn analyze(&self, file: &UploadFile) -> Result<AnalysisPayload>;
}
