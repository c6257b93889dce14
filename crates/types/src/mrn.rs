/// Errors that can occur when creating a medical record number.
#[derive(Debug, thiserror::Error)]
pub enum MrnError {
    /// Zero is reserved and never a valid record number
    #[error("MRN must be a positive integer")]
    Zero,
    /// The input could not be parsed as an integer
    #[error("MRN must be numeric: {0}")]
    NotNumeric(std::num::ParseIntError),
}

/// A medical record number: the unique, immutable patient identifier.
///
/// Guaranteed positive. Serialises as a bare JSON number so stored records
/// and reports remain interpretable by other systems keyed on MRN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mrn(u32);

impl Mrn {
    /// Creates a new `Mrn` from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns `MrnError::Zero` if the value is zero.
    pub fn new(value: u32) -> Result<Self, MrnError> {
        if value == 0 {
            return Err(MrnError::Zero);
        }
        Ok(Self(value))
    }

    /// Returns the raw integer value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Mrn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Mrn {
    type Err = MrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(MrnError::NotNumeric)?;
        Self::new(value)
    }
}

impl serde::Serialize for Mrn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Mrn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Mrn::new(value).map_err(serde::de::Error::custom)
    }
}
