//! FHIR release identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A FHIR specification release supported by the server.
///
/// One release is selected per server process; the model tables, and
/// therefore the generated GraphQL schema, differ between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirRelease {
    /// FHIR DSTU2, version 1.0.2.
    #[serde(rename = "1.0.2")]
    Dstu2,
    /// FHIR STU3, version 3.0.1.
    #[serde(rename = "3.0.1")]
    Stu3,
    /// FHIR R4, version 4.0.0.
    #[serde(rename = "4.0.0")]
    R4,
}

impl FhirRelease {
    /// All supported releases, oldest first.
    pub const ALL: [FhirRelease; 3] = [FhirRelease::Dstu2, FhirRelease::Stu3, FhirRelease::R4];

    /// The dotted version string used in FHIR metadata ("1.0.2", ...).
    #[must_use]
    pub fn version(&self) -> &'static str {
        match self {
            Self::Dstu2 => "1.0.2",
            Self::Stu3 => "3.0.1",
            Self::R4 => "4.0.0",
        }
    }

    /// The publication name ("DSTU2", "STU3", "R4").
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dstu2 => "DSTU2",
            Self::Stu3 => "STU3",
            Self::R4 => "R4",
        }
    }
}

impl Default for FhirRelease {
    fn default() -> Self {
        Self::R4
    }
}

impl fmt::Display for FhirRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version())
    }
}

/// Error returned when parsing an unknown release string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown FHIR release '{0}', expected one of: 1.0.2, 3.0.1, 4.0.0")]
pub struct UnknownRelease(pub String);

impl FromStr for FhirRelease {
    type Err = UnknownRelease;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.0.2" | "dstu2" | "DSTU2" => Ok(Self::Dstu2),
            "3.0.1" | "stu3" | "STU3" => Ok(Self::Stu3),
            "4.0.0" | "r4" | "R4" => Ok(Self::R4),
            other => Err(UnknownRelease(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_strings() {
        assert_eq!(FhirRelease::Dstu2.version(), "1.0.2");
        assert_eq!(FhirRelease::Stu3.version(), "3.0.1");
        assert_eq!(FhirRelease::R4.version(), "4.0.0");
    }

    #[test]
    fn test_parse() {
        assert_eq!("4.0.0".parse::<FhirRelease>().unwrap(), FhirRelease::R4);
        assert_eq!("r4".parse::<FhirRelease>().unwrap(), FhirRelease::R4);
        assert_eq!("1.0.2".parse::<FhirRelease>().unwrap(), FhirRelease::Dstu2);
        assert!("5.0.0".parse::<FhirRelease>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for release in FhirRelease::ALL {
            assert_eq!(
                release.to_string().parse::<FhirRelease>().unwrap(),
                release
            );
        }
    }

    #[test]
    fn test_serde_uses_version_string() {
        let json = serde_json::to_string(&FhirRelease::R4).unwrap();
        assert_eq!(json, "\"4.0.0\"");
    }
}
