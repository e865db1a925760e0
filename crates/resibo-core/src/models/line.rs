//! The input unit: a single OCR-produced text fragment.

use serde::{Deserialize, Serialize};

/// A single OCR-produced text fragment, in reading order.
///
/// The extraction core reads only [`Line::text`]; `confidence` and `bbox`
/// exist so the wider pipeline can pass them through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Trimmed, non-empty OCR text.
    pub text: String,

    /// OCR confidence for this fragment, in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,

    /// Bounding polygon (four corners, clockwise from top-left), in source
    /// image pixel coordinates. Unused by the core; preserved for callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[(i32, i32); 4]>,
}

impl Line {
    /// Build a line from bare text, as a test or CLI convenience.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            bbox: None,
        }
    }

    /// Build a `Vec<Line>` from plain strings (one line per entry).
    pub fn from_strs<I, S>(lines: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines.into_iter().map(Line::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_strs() {
        let lines = Line::from_strs(["A", "B"]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "A");
        assert_eq!(lines[0].confidence, 1.0);
    }
}
