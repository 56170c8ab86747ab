//! Authentication types for JWT.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User email at the time of issue.
    pub email: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: UserId, email: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.into_inner(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = UserId::new();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(user_id, "ana@example.com", expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }
}
