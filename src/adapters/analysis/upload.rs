//! Upload files accepted by the analysis API

use crate::domain::{AnalysisError, Result, WhispError};
use std::path::Path;

/// Accepted file extensions with the MIME type sent for each
pub const ACCEPTED_EXTENSIONS: [(&str, &str); 3] = [
    ("json", "application/json"),
    ("geojson", "application/geo+json"),
    ("txt", "text/plain"),
];

/// A validated file ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    file_name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl UploadFile {
    /// Validate a file name and wrap its contents
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidFile` if the extension is not
    /// `.json`, `.geojson` or `.txt` (any case).
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).ok_or_else(|| {
            AnalysisError::InvalidFile(format!(
                "{file_name}. Only .txt, .json and .geojson files are accepted"
            ))
        })?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Read and validate a file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                WhispError::Validation(format!("Not a file path: {}", path.display()))
            })?
            .to_string();

        // Check the type before reading so a wrong file fails fast.
        if mime_for(&file_name).is_none() {
            return Self::new(file_name, Vec::new());
        }

        let bytes = std::fs::read(path)
            .map_err(|e| WhispError::Io(format!("Failed to read {}: {e}", path.display())))?;
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    ACCEPTED_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}
