//! Date annotations stored alongside a note.
//!
//! The note feature persists the extractor's output verbatim next to the note
//! text, plus a `hasDate` flag used for filtering. The content hash lets an
//! edit that leaves the text unchanged skip re-extraction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::content_hash;
use crate::ExtractedMatch;

/// Persisted date information for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoDates {
    /// Whether any date reference was found.
    pub has_date: bool,

    /// Matches in extractor order; `null` when there are none.
    pub extracted_dates: Option<Vec<ExtractedMatch>>,

    /// SHA-256 of the note text the matches were extracted from.
    pub content_hash: String,
}

impl MemoDates {
    /// Build the record for `content` from an extraction result.
    ///
    /// `has_date` comes from the existence check; matches are only kept when
    /// it is set.
    #[must_use]
    pub fn new(content: &str, has_date: bool, matches: Vec<ExtractedMatch>) -> Self {
        Self {
            has_date,
            extracted_dates: has_date.then_some(matches),
            content_hash: content_hash(content),
        }
    }

    /// Reject note bodies that carry no text at all.
    pub fn require_content(content: &str) -> Result<&str> {
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("content is required".to_string()));
        }
        Ok(content)
    }

    /// True when `content` differs from the text these dates came from.
    #[must_use]
    pub fn is_stale(&self, content: &str) -> bool {
        self.content_hash != content_hash(content)
    }

    #[must_use]
    pub fn matches(&self) -> &[ExtractedMatch] {
        self.extracted_dates.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalInstant;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_record_keeps_matches_when_dated() {
        let start = LocalInstant::new(2024, 1, 2, 9, 0, 0).expect("valid instant");
        let dates = MemoDates::new("내일 회의", true, vec![ExtractedMatch::new("내일", start, 0)]);

        assert!(dates.has_date);
        assert_eq!(dates.matches().len(), 1);
        assert!(!dates.is_stale("내일 회의"));
        assert!(dates.is_stale("모레 회의"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_undated_record_serializes_null() {
        let dates = MemoDates::new("장보기", false, Vec::new());
        assert!(dates.matches().is_empty());

        let json = serde_json::to_value(&dates).expect("record should serialize");
        assert_eq!(json["hasDate"], false);
        assert!(json["extractedDates"].is_null());
    }

    #[test]
    fn test_empty_content_is_rejected() {
        assert!(MemoDates::require_content("").is_err());
        assert!(MemoDates::require_content("   ").is_err());
        assert!(MemoDates::require_content("메모").is_ok());
    }
}
