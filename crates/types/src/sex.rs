/// Errors that can occur when parsing a sex value.
#[derive(Debug, thiserror::Error)]
pub enum SexParseError {
    /// The input did not match any recognised sex value
    #[error("unrecognised sex {0:?} (expected M, F or unknown)")]
    Unrecognised(String),
}

/// Recorded sex of a patient, as used by the WHO REE formula.
///
/// Stored records use the single-letter codes `"M"` and `"F"`; anything the
/// upstream system could not classify is carried as `"unknown"` rather than
/// rejected, since a record with unknown sex is still valid for everything
/// except the REE estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "unknown", alias = "U")]
    Unknown,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "unknown",
        };
        write!(f, "{code}")
    }
}

impl std::str::FromStr for Sex {
    type Err = SexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            "u" | "unknown" => Ok(Sex::Unknown),
            _ => Err(SexParseError::Unrecognised(s.to_string())),
        }
    }
}
