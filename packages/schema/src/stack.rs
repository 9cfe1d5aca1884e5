use serde::{Deserialize, Serialize};

/// How a section's columns rearrange on narrow viewports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackMode {
    /// Stack every column vertically (renderer default).
    #[default]
    #[serde(rename = "yes")]
    Yes,
    /// Keep all columns side by side.
    #[serde(rename = "no")]
    No,
    /// Stack the last two columns under the first two. Four columns only.
    #[serde(rename = "2x2")]
    TwoByTwo,
}

impl StackMode {
    /// Resolve a requested mode against a column count.
    ///
    /// A single column has no stack mode at all, and `2x2` degrades to
    /// `yes` unless there are exactly four columns.
    pub fn normalize(requested: Option<StackMode>, columns: usize) -> Option<StackMode> {
        if columns <= 1 {
            return None;
        }
        match requested {
            Some(StackMode::TwoByTwo) if columns != 4 => Some(StackMode::Yes),
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StackMode::Yes => "yes",
            StackMode::No => "no",
            StackMode::TwoByTwo => "2x2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_requires_four_columns() {
        assert_eq!(StackMode::normalize(Some(StackMode::TwoByTwo), 3), Some(StackMode::Yes));
        assert_eq!(StackMode::normalize(Some(StackMode::TwoByTwo), 4), Some(StackMode::TwoByTwo));
    }

    #[test]
    fn test_single_column_has_no_stack_mode() {
        assert_eq!(StackMode::normalize(Some(StackMode::No), 1), None);
        assert_eq!(StackMode::normalize(Some(StackMode::Yes), 0), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&StackMode::TwoByTwo).unwrap(), "\"2x2\"");
        let mode: StackMode = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(mode, StackMode::No);
    }
}
