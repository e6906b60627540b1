//! Analysis payload decoding and feature extraction
//!
//! The analysis API has answered with several response shapes over time.
//! [`PayloadShape`] names them, and [`AnalysisPayload::shape`] picks exactly
//! one, probing in a fixed priority order so that newer shapes win:
//!
//! 1. `{"data": {"features": [...]}}`
//! 2. `{"result": {"features": [...]}}`
//! 3. `{"features": [...]}`
//! 4. `[...]` (bare array of features)
//! 5. any other object, treated as one degenerate feature
//!
//! Anything else decodes to [`PayloadShape::Empty`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which response shape a payload was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `data.features` array
    DataFeatures,
    /// `result.features` array
    ResultFeatures,
    /// Top-level `features` array
    Features,
    /// The payload itself is an array of features
    BareArray,
    /// An object with no feature array, wrapped as a single feature
    SingleFeature,
    /// No features can be located
    Empty,
}

impl PayloadShape {
    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataFeatures => "data.features",
            Self::ResultFeatures => "result.features",
            Self::Features => "features",
            Self::BareArray => "array",
            Self::SingleFeature => "single",
            Self::Empty => "empty",
        }
    }
}

/// Opaque analysis result as returned by the API or loaded from state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisPayload(Value);

impl AnalysisPayload {
    /// Wrap a raw JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a payload from JSON text
    pub fn from_json_str(text: &str) -> crate::domain::Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    /// Compact JSON text of the payload
    pub fn to_json_string(&self) -> crate::domain::Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Borrow the raw JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the raw JSON value
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Recognize the payload shape
    pub fn shape(&self) -> PayloadShape {
        let value = &self.0;
        if nested_features(value, "data").is_some() {
            PayloadShape::DataFeatures
        } else if nested_features(value, "result").is_some() {
            PayloadShape::ResultFeatures
        } else if value.get("features").is_some_and(Value::is_array) {
            PayloadShape::Features
        } else if value.is_array() {
            PayloadShape::BareArray
        } else if value.is_object() {
            PayloadShape::SingleFeature
        } else {
            PayloadShape::Empty
        }
    }

    /// Locate the features of this payload
    ///
    /// Never fails: an unrecognizable payload yields an empty vector,
    /// which callers treat as "no data".
    pub fn features(&self) -> Vec<Feature> {
        let value = &self.0;
        let items: &[Value] = match self.shape() {
            PayloadShape::DataFeatures => nested_features(value, "data").unwrap_or_default(),
            PayloadShape::ResultFeatures => nested_features(value, "result").unwrap_or_default(),
            PayloadShape::Features => value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            PayloadShape::BareArray => value.as_array().map(Vec::as_slice).unwrap_or_default(),
            PayloadShape::SingleFeature => return vec![Feature::new(value.clone())],
            PayloadShape::Empty => &[],
        };

        items.iter().cloned().map(Feature::new).collect()
    }
}

impl From<Value> for AnalysisPayload {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

fn nested_features<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value
        .get(key)?
        .get("features")?
        .as_array()
        .map(Vec::as_slice)
}

/// Extract the features of an analysis payload
///
/// Convenience form of [`AnalysisPayload::features`].
///
/// # Examples
///
/// ```
/// use whisp::domain::payload::{extract_features, AnalysisPayload};
/// use serde_json::json;
///
/// let payload = AnalysisPayload::new(json!({"result": {"features": [{"properties": {}}]}}));
/// assert_eq!(extract_features(&payload).len(), 1);
/// ```
pub fn extract_features(payload: &AnalysisPayload) -> Vec<Feature> {
    let features = payload.features();
    tracing::debug!(
        shape = payload.shape().as_str(),
        count = features.len(),
        "Extracted features from analysis payload"
    );
    features
}

/// One geographic record of an analysis result
#[derive(Debug, Clone, PartialEq)]
pub struct Feature(Value);

impl Feature {
    /// Wrap a raw feature value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The feature's geometry, if present and not null
    pub fn geometry(&self) -> Option<&Value> {
        self.0.get("geometry").filter(|g| !g.is_null())
    }

    /// The property bag
    ///
    /// Falls back to the feature itself when it has no `properties` object.
    pub fn properties(&self) -> &Value {
        match self.0.get("properties") {
            Some(props) if props.is_object() => props,
            _ => &self.0,
        }
    }

    /// Borrow the raw JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
