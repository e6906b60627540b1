//! Visual encoding of risk levels and compliance statuses
//!
//! Pure table lookups. Unrecognized inputs always land on the gray
//! "unknown" entry.

use crate::domain::{ComplianceStatus, RiskLevel};
use serde::Serialize;

pub const RED: &str = "#dc2626";
pub const AMBER: &str = "#f59e0b";
pub const GREEN: &str = "#10b981";
pub const GRAY: &str = "#6b7280";

/// Color and marker glyph for a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

/// Style for a risk level
pub fn style_for(risk: RiskLevel) -> RiskStyle {
    match risk {
        RiskLevel::High => RiskStyle {
            color: RED,
            icon: "⚠",
        },
        RiskLevel::Medium => RiskStyle {
            color: AMBER,
            icon: "◆",
        },
        RiskLevel::Low => RiskStyle {
            color: GREEN,
            icon: "✔",
        },
        RiskLevel::Unknown => RiskStyle {
            color: GRAY,
            icon: "?",
        },
    }
}

/// Style for a raw risk label, e.g. straight from a payload
pub fn style_for_label(label: &str) -> RiskStyle {
    style_for(RiskLevel::parse(label))
}

/// Color for a compliance status
pub fn compliance_color(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => GREEN,
        ComplianceStatus::NonCompliant => RED,
        ComplianceStatus::PartiallyCompliant => AMBER,
        ComplianceStatus::Unknown => GRAY,
    }
}

/// Color for a raw compliance label (case-insensitive)
pub fn compliance_color_for_label(label: &str) -> &'static str {
    compliance_color(ComplianceStatus::parse(label))
}
