use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column width in hundredths of a percent (`5000` is `50%`).
///
/// Integer storage keeps preset tuples summing to exactly 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Width(u32);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidthParseError {
    #[error("Width must be a percentage: {0}")]
    NotAPercentage(String),

    #[error("Width out of range: {0}")]
    OutOfRange(String),
}

impl Width {
    pub const FULL: Width = Width(10_000);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Sum of a width tuple, in hundredths of a percent.
    pub fn total(widths: &[Width]) -> u32 {
        widths.iter().map(|w| w.0).sum()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{}%", whole)
        } else if fraction % 10 == 0 {
            write!(f, "{}.{}%", whole, fraction / 10)
        } else {
            write!(f, "{}.{:02}%", whole, fraction)
        }
    }
}

impl FromStr for Width {
    type Err = WidthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix('%')
            .ok_or_else(|| WidthParseError::NotAPercentage(s.to_string()))?;
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| WidthParseError::NotAPercentage(s.to_string()))?;

        if !(0.0..=100.0).contains(&value) {
            return Err(WidthParseError::OutOfRange(s.to_string()));
        }

        Ok(Width((value * 100.0).round() as u32))
    }
}

impl TryFrom<String> for Width {
    type Error = WidthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Width> for String {
    fn from(width: Width) -> Self {
        width.to_string()
    }
}
