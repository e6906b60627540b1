//! Map viewer handoff URLs
//!
//! An analysis result can be handed to the map viewer inline, as the
//! URL-encoded JSON value of the `data` query parameter:
//! `map.html?data=<url-encoded json>`.

use crate::domain::{AnalysisPayload, Result, WhispError};
use url::Url;

/// Query parameter carrying the payload
pub const DATA_PARAM: &str = "data";

pub const DEFAULT_VIEWER_URL: &str = "map.html";

// Base used to resolve relative viewer paths such as `map.html`.
const RELATIVE_BASE: &str = "relative:///";

/// Build a viewer URL carrying `payload`
///
/// `viewer` may be absolute (`https://host/map.html`), a bare relative
/// path (`map.html`) or root-relative (`/viewer/map.html`). A relative
/// viewer yields a relative URL of the same kind.
///
/// # Examples
///
/// ```
/// use whisp::core::handoff::{decode_view_url, encode_view_url};
/// use whisp::domain::AnalysisPayload;
/// use serde_json::json;
///
/// let payload = AnalysisPayload::new(json!({"features": []}));
/// let url = encode_view_url("map.html", &payload).unwrap();
/// assert!(url.starts_with("map.html?data="));
/// assert_eq!(decode_view_url(&url).unwrap(), Some(payload));
/// ```
pub fn encode_view_url(viewer: &str, payload: &AnalysisPayload) -> Result<String> {
    let json = payload.to_json_string()?;
    let (mut url, relative) = parse_viewer(viewer)?;

    url.query_pairs_mut()
        .clear()
        .append_pair(DATA_PARAM, &json);

    if relative {
        let mut path = url.path();
        if !viewer.starts_with('/') {
            path = path.trim_start_matches('/');
        }
        let query = url.query().unwrap_or_default();
        Ok(format!("{path}?{query}"))
    } else {
        Ok(url.to_string())
    }
}

/// Extract the payload from a viewer URL
///
/// Returns `Ok(None)` when the URL has no `data` parameter. A `data`
/// parameter that is not valid JSON is an error.
pub fn decode_view_url(view_url: &str) -> Result<Option<AnalysisPayload>> {
    let (url, _) = parse_viewer(view_url)?;

    let Some((_, data)) = url.query_pairs().find(|(key, _)| key == DATA_PARAM) else {
        return Ok(None);
    };

    AnalysisPayload::from_json_str(&data)
        .map(Some)
        .map_err(|e| WhispError::Validation(format!("Invalid map data in URL: {e}")))
}

fn parse_viewer(viewer: &str) -> Result<(Url, bool)> {
    match Url::parse(viewer) {
        Ok(url) => Ok((url, false)),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE)?;
            Ok((base.join(viewer)?, true))
        }
        Err(e) => Err(e.into()),
    }
}
