/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during
/// construction; a trimmed-empty input is rejected. Used for fields such as
/// patient names and supplement names, where an empty value is never
/// clinically meaningful.
///
/// Serialisation goes through the `String` conversions below, so a stored
/// empty string fails deserialisation the same way `new` rejects it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let text = input.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        // Reuse the allocation when there was nothing to trim.
        if trimmed.len() == text.len() {
            Ok(Self(text))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Jane  ").expect("should accept non-empty input");
        assert_eq!(text.as_str(), "Jane");
    }

    #[test]
    fn new_rejects_empty_and_whitespace_only_input() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new("   \t"), Err(TextError::Empty)));
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err(), "empty string should fail deserialisation");
    }

    #[test]
    fn deserialize_trims_like_the_constructor() {
        let text: NonEmptyText =
            serde_json::from_str("\" Jane \"").expect("should deserialise");
        assert_eq!(text.as_str(), "Jane");
    }

    #[test]
    fn serialises_as_plain_string() {
        let text = NonEmptyText::new("Doe").expect("valid text");
        let json = serde_json::to_string(&text).expect("should serialise");
        assert_eq!(json, "\"Doe\"");
    }
}
