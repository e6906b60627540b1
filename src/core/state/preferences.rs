//! User preferences: compliance framework and subscription plan

use crate::domain::{Result, WhispError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Compliance framework selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceType {
    #[serde(rename = "EUDR")]
    Eudr,
    #[serde(rename = "Rainforest Alliance")]
    RainforestAlliance,
    #[serde(rename = "FSC")]
    Fsc,
}

impl ComplianceType {
    pub const ALL: [ComplianceType; 3] = [Self::Eudr, Self::RainforestAlliance, Self::Fsc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eudr => "EUDR",
            Self::RainforestAlliance => "Rainforest Alliance",
            Self::Fsc => "FSC",
        }
    }
}

impl fmt::Display for ComplianceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceType {
    type Err = WhispError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                WhispError::Validation(format!(
                    "Invalid compliance type: {s}. Expected 'EUDR', 'Rainforest Alliance' or 'FSC'"
                ))
            })
    }
}

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Pro,
    Ultra,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = WhispError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            "ultra" => Ok(Self::Ultra),
            _ => Err(WhispError::Validation(format!(
                "Invalid plan: {s}. Expected 'basic', 'pro' or 'ultra'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("EUDR", ComplianceType::Eudr)]
    #[test_case("eudr", ComplianceType::Eudr)]
    #[test_case("Rainforest Alliance", ComplianceType::RainforestAlliance)]
    #[test_case("fsc", ComplianceType::Fsc)]
    fn test_compliance_type_parse(input: &str, expected: ComplianceType) {
        assert_eq!(input.parse::<ComplianceType>().unwrap(), expected);
    }

    #[test]
    fn test_invalid_preferences() {
        assert!("ISO".parse::<ComplianceType>().is_err());
        assert!("enterprise".parse::<Plan>().is_err());
    }

    #[test]
    fn test_plan_round_trip() {
        for plan in [Plan::Basic, Plan::Pro, Plan::Ultra] {
            assert_eq!(plan.as_str().parse::<Plan>().unwrap(), plan);
        }
    }
}
