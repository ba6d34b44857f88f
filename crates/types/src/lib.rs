//! Validated scalar types shared across burrow crates.

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("text must contain at least one non-whitespace character")]
    Empty,
}

/// Rejections from [`Price`] construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NumberError {
    #[error("'{0}' is not a number")]
    NotNumeric(String),
    #[error("number must be finite")]
    NotFinite,
    #[error("number must be 0 or greater, got {0}")]
    Negative(f64),
}

/// Trimmed text holding at least one visible character.
///
/// Used for every required label (usernames, topics, item names, patient and doctor names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and rejects it with [`TextError::Empty`] if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            text => Ok(Self(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monetary amount that is finite and not negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Creates a `Price`, rejecting NaN, infinities and negative values.
    pub fn new(value: f64) -> Result<Self, NumberError> {
        if !value.is_finite() {
            return Err(NumberError::NotFinite);
        }
        if value < 0.0 {
            return Err(NumberError::Negative(value));
        }
        Ok(Self(value))
    }

    /// Parses a price from text such as `"3.99"`.
    ///
    /// Surrounding whitespace is ignored. An empty string is not a number.
    pub fn parse(input: &str) -> Result<Self, NumberError> {
        let trimmed = input.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| NumberError::NotNumeric(input.to_owned()))?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
