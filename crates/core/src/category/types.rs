//! Category data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::lenient;
use mymoney_shared::types::{CategoryId, UserId};

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owning user.
    pub owner: UserId,
    /// Label, unique per owner.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Raw category submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Label.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

impl CategoryInput {
    /// Returns the trimmed description, or `None` if it is missing or blank.
    #[must_use]
    pub fn normalized_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_trimmed() {
        let input = CategoryInput {
            description: Some("  Mercado ".into()),
        };
        assert_eq!(input.normalized_description(), Some("Mercado"));
    }

    #[test]
    fn test_non_text_description_is_missing() {
        let input: CategoryInput = serde_json::from_str(r#"{"description": 12}"#).unwrap();
        assert_eq!(input.normalized_description(), None);
    }

    #[test]
    fn test_blank_description_is_missing() {
        let input = CategoryInput {
            description: Some("   ".into()),
        };
        assert_eq!(input.normalized_description(), None);
        assert_eq!(CategoryInput::default().normalized_description(), None);
    }
}
