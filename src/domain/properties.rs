//! Display-ready view of a feature's properties
//!
//! [`ResolvedProperties::resolve`] decodes the loosely-typed property bag of a
//! [`Feature`] once. Every field is always populated: absent paths, empty
//! strings and values of an unexpected JSON type all resolve to the field's
//! default, so renderers and exporters never see a missing value.

use super::payload::Feature;
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Placeholder shown for missing display values
pub const NOT_AVAILABLE: &str = "N/A";

/// Default country name when none is given
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Overall deforestation risk of a plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl RiskLevel {
    /// Parse a risk label; matching is case-sensitive
    pub fn parse(label: &str) -> Self {
        match label {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compliance status of a plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    PartiallyCompliant,
    Unknown,
}

impl ComplianceStatus {
    /// Parse a compliance label, ignoring case
    ///
    /// Both `partially-compliant` and `partially compliant` are accepted.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "compliant" => Self::Compliant,
            "non-compliant" => Self::NonCompliant,
            "partially-compliant" | "partially compliant" => Self::PartiallyCompliant,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non-compliant",
            Self::PartiallyCompliant => "partially-compliant",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plot identifier, either supplied by the API or derived from position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlotId {
    /// `plot_id` from the feature
    Given(String),
    /// 1-based position within the result set
    Positional(usize),
}

impl PlotId {
    /// Production place used by the exporters: the given id or `PLOT-{n}`
    pub fn production_place(&self) -> String {
        match self {
            Self::Given(id) => id.clone(),
            Self::Positional(n) => format!("PLOT-{n}"),
        }
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Given(id) => f.write_str(id),
            Self::Positional(n) => write!(f, "{n}"),
        }
    }
}

/// Normalized properties of one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProperties {
    pub plot_id: PlotId,
    pub country_name: Option<String>,
    pub total_area_hectares: Option<f64>,
    /// Area number exactly as sent, integer or float
    pub total_area_number: Option<Number>,
    pub overall_risk: RiskLevel,
    /// Risk label as sent by the API, if any
    pub risk_label: Option<String>,
    pub compliance_status: ComplianceStatus,
    /// Compliance label as sent by the API, if any
    pub compliance_label: Option<String>,
    pub gfw_loss_stat: String,
    pub jrc_loss_stat: String,
    pub sbtn_loss_stat: String,
    pub high_risk_datasets: Vec<String>,
}

impl ResolvedProperties {
    /// Resolve the properties of the feature at zero-based `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use whisp::domain::payload::Feature;
    /// use whisp::domain::properties::{ResolvedProperties, RiskLevel};
    /// use serde_json::json;
    ///
    /// let feature = Feature::new(json!({
    ///     "properties": {"overall_compliance": {"overall_risk": "high"}}
    /// }));
    /// let props = ResolvedProperties::resolve(&feature, 0);
    /// assert_eq!(props.overall_risk, RiskLevel::High);
    /// assert_eq!(props.plot_id.to_string(), "1");
    /// ```
    pub fn resolve(feature: &Feature, index: usize) -> Self {
        let props = feature.properties();
        let compliance = props.get("overall_compliance");

        let plot_id = match text_at(props, &["plot_id"]) {
            Some(id) => PlotId::Given(id),
            None => PlotId::Positional(index + 1),
        };

        let compliance_label = compliance.and_then(|c| text_at(c, &["compliance_status"]));
        let compliance_status = compliance_label
            .as_deref()
            .map(ComplianceStatus::parse)
            .unwrap_or(ComplianceStatus::Unknown);

        let risk_label = compliance.and_then(|c| text_at(c, &["overall_risk"]));
        let overall_risk = risk_label
            .as_deref()
            .map(RiskLevel::parse)
            .unwrap_or(RiskLevel::Unknown);

        let total_area_number = match props.get("total_area_hectares") {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        let high_risk_datasets = compliance
            .and_then(|c| c.get("high_risk_datasets"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(scalar_text).collect())
            .unwrap_or_default();

        Self {
            plot_id,
            country_name: text_at(props, &["country_name"]),
            total_area_hectares: total_area_number.as_ref().and_then(Number::as_f64),
            total_area_number,
            overall_risk,
            risk_label,
            compliance_status,
            compliance_label,
            gfw_loss_stat: text_or_na(props, &["gfw_loss", "gfw_loss_stat"]),
            jrc_loss_stat: text_or_na(props, &["jrc_loss", "jrc_loss_stat"]),
            sbtn_loss_stat: text_or_na(props, &["sbtn_loss", "sbtn_loss_stat"]),
            high_risk_datasets,
        }
    }

    /// Country name for export, `Unknown` when absent
    pub fn country_or_unknown(&self) -> &str {
        self.country_name.as_deref().unwrap_or(UNKNOWN_COUNTRY)
    }

    /// Country name for display, `N/A` when absent
    pub fn country_display(&self) -> &str {
        self.country_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Area with exactly two decimals, or `N/A`
    pub fn area_display(&self) -> String {
        match self.total_area_hectares {
            Some(area) => format!("{area:.2}"),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Raw area for export, `0` when absent
    pub fn area_raw(&self) -> f64 {
        self.total_area_hectares.unwrap_or(0.0)
    }

    /// Area as a JSON number for export, `0` when absent
    pub fn area_export(&self) -> Number {
        self.total_area_number.clone().unwrap_or_else(|| Number::from(0))
    }

    /// Risk label as sent, or `N/A`
    pub fn risk_display(&self) -> &str {
        self.risk_label.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Compliance label as sent, or `N/A`
    pub fn compliance_display(&self) -> &str {
        self.compliance_label.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Compliance label for export, `Unknown` when absent
    pub fn compliance_export_label(&self) -> &str {
        self.compliance_label.as_deref().unwrap_or("Unknown")
    }

    /// High-risk datasets joined for display, or `None`
    pub fn high_risk_display(&self) -> String {
        if self.high_risk_datasets.is_empty() {
            "None".to_string()
        } else {
            self.high_risk_datasets.join(", ")
        }
    }
}

/// Resolve every feature of a slice, keeping positions
pub fn resolve_all(features: &[Feature]) -> Vec<ResolvedProperties> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| ResolvedProperties::resolve(feature, index))
        .collect()
}

fn text_at(root: &Value, path: &[&str]) -> Option<String> {
    let mut current = root;
    for segment in path {
        current = current.get(segment)?;
    }
    scalar_text(current)
}

fn text_or_na(root: &Value, path: &[&str]) -> String {
    text_at(root, path).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// Strings and numbers are usable as text; empty strings count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn full_feature() -> Feature {
        Feature::new(json!({
            "type": "Feature",
            "geometry": null,
            "properties": {
                "plot_id": "P1",
                "country_name": "Indonesia",
                "total_area_hectares": 12.345,
                "overall_compliance": {
                    "overall_risk": "high",
                    "compliance_status": "non-compliant",
                    "high_risk_datasets": ["GFW", "JRC"]
                },
                "gfw_loss": {"gfw_loss_stat": "true"},
                "jrc_loss": {"jrc_loss_stat": "false"},
                "sbtn_loss": {"sbtn_loss_stat": "true"}
            }
        }))
    }

    #[test]
    fn test_resolve_full_feature() {
        let props = ResolvedProperties::resolve(&full_feature(), 0);

        assert_eq!(props.plot_id, PlotId::Given("P1".to_string()));
        assert_eq!(props.country_name.as_deref(), Some("Indonesia"));
        assert_eq!(props.total_area_hectares, Some(12.345));
        assert_eq!(props.area_display(), "12.35");
        assert_eq!(props.area_raw(), 12.345);
        assert_eq!(props.overall_risk, RiskLevel::High);
        assert_eq!(props.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(props.compliance_export_label(), "non-compliant");
        assert_eq!(props.gfw_loss_stat, "true");
        assert_eq!(props.jrc_loss_stat, "false");
        assert_eq!(props.sbtn_loss_stat, "true");
        assert_eq!(props.high_risk_datasets, vec!["GFW", "JRC"]);
        assert_eq!(props.high_risk_display(), "GFW, JRC");
    }

    #[test]
    fn test_resolve_defaults() {
        let feature = Feature::new(json!({"properties": {}}));
        let props = ResolvedProperties::resolve(&feature, 4);

        assert_eq!(props.plot_id, PlotId::Positional(5));
        assert_eq!(props.plot_id.to_string(), "5");
        assert_eq!(props.plot_id.production_place(), "PLOT-5");
        assert_eq!(props.country_name, None);
        assert_eq!(props.country_or_unknown(), "Unknown");
        assert_eq!(props.country_display(), "N/A");
        assert_eq!(props.total_area_hectares, None);
        assert_eq!(props.area_display(), "N/A");
        assert_eq!(props.area_raw(), 0.0);
        assert_eq!(props.overall_risk, RiskLevel::Unknown);
        assert_eq!(props.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(props.compliance_export_label(), "Unknown");
        assert_eq!(props.gfw_loss_stat, "N/A");
        assert_eq!(props.jrc_loss_stat, "N/A");
        assert_eq!(props.sbtn_loss_stat, "N/A");
        assert!(props.high_risk_datasets.is_empty());
        assert_eq!(props.high_risk_display(), "None");
    }

    #[test]
    fn test_resolve_without_properties_uses_feature_keys() {
        let feature = Feature::new(json!({
            "plot_id": "flat-1",
            "country_name": "Brazil",
            "overall_compliance": {"overall_risk": "low"}
        }));
        let props = ResolvedProperties::resolve(&feature, 0);

        assert_eq!(props.plot_id.to_string(), "flat-1");
        assert_eq!(props.country_display(), "Brazil");
        assert_eq!(props.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let feature = Feature::new(json!({"properties": {
            "plot_id": {"nested": true},
            "country_name": 7,
            "total_area_hectares": "12.5",
            "overall_compliance": "high",
            "gfw_loss": ["x"],
        }}));
        let props = ResolvedProperties::resolve(&feature, 2);

        assert_eq!(props.plot_id, PlotId::Positional(3));
        assert_eq!(props.country_or_unknown(), "7");
        assert_eq!(props.total_area_hectares, None);
        assert_eq!(props.overall_risk, RiskLevel::Unknown);
        assert_eq!(props.gfw_loss_stat, "N/A");
    }

    #[test]
    fn test_numeric_plot_id_and_empty_string() {
        let numeric = Feature::new(json!({"properties": {"plot_id": 42}}));
        assert_eq!(
            ResolvedProperties::resolve(&numeric, 0).plot_id,
            PlotId::Given("42".to_string())
        );

        let empty = Feature::new(json!({"properties": {"plot_id": ""}}));
        assert_eq!(
            ResolvedProperties::resolve(&empty, 0).plot_id,
            PlotId::Positional(1)
        );
    }

    #[test_case("high", RiskLevel::High)]
    #[test_case("medium", RiskLevel::Medium)]
    #[test_case("low", RiskLevel::Low)]
    #[test_case("HIGH", RiskLevel::Unknown ; "risk is case sensitive")]
    #[test_case("extreme", RiskLevel::Unknown)]
    fn test_risk_parse(label: &str, expected: RiskLevel) {
        assert_eq!(RiskLevel::parse(label), expected);
    }

    #[test_case("compliant", ComplianceStatus::Compliant)]
    #[test_case("Non-Compliant", ComplianceStatus::NonCompliant)]
    #[test_case("partially-compliant", ComplianceStatus::PartiallyCompliant)]
    #[test_case("Partially Compliant", ComplianceStatus::PartiallyCompliant)]
    #[test_case("pending", ComplianceStatus::Unknown)]
    fn test_compliance_parse(label: &str, expected: ComplianceStatus) {
        assert_eq!(ComplianceStatus::parse(label), expected);
    }

    #[test]
    fn test_resolve_all_keeps_positions() {
        let features = vec![
            Feature::new(json!({"properties": {"plot_id": "A"}})),
            Feature::new(json!({"properties": {}})),
        ];
        let resolved = resolve_all(&features);
        assert_eq!(resolved[0].plot_id.to_string(), "A");
        assert_eq!(resolved[1].plot_id.production_place(), "PLOT-2");
    }

    #[test]
    fn test_non_string_datasets_are_skipped() {
        let feature = Feature::new(json!({"properties": {"overall_compliance": {
            "high_risk_datasets": ["GFW", null, 3, ""]
        }}}));
        let props = ResolvedProperties::resolve(&feature, 0);
        assert_eq!(props.high_risk_datasets, vec!["GFW", "3"]);
    }
}
