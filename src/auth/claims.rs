use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Verified access-token claims. Lives for one request and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id at the signing authority)
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub aud: Option<Audience>,
    #[serde(default)]
    pub exp: usize, // Expiration time (as UTC timestamp)
    #[serde(default)]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp as i64, 0)
    }
}

/// Checks that `permission` is granted by the token.
///
/// A token without a `permissions` claim is malformed for this API (RBAC
/// must be enabled on the signing authority), which is reported separately
/// from a token that simply lacks the requested permission.
pub fn check_permissions(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or_else(AuthError::permissions_missing)?;

    if !granted.iter().any(|p| p == permission) {
        return Err(AuthError::permission_not_found());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with(permissions: Option<Vec<&str>>) -> Claims {
        Claims {
            sub: "auth0|player".to_string(),
            iss: Some("https://trivia-test.auth0.com/".to_string()),
            aud: Some(Audience::Single("trivia-api".to_string())),
            exp: 9999999999,
            iat: Some(0),
            permissions: permissions.map(|p| p.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_permission_granted() {
        let claims = claims_with(Some(vec!["get:questions", "get:quizzes"]));
        assert!(check_permissions(&claims, "get:quizzes").is_ok());
    }

    #[test]
    fn test_permission_not_granted() {
        let claims = claims_with(Some(vec!["get:questions"]));
        assert_eq!(
            check_permissions(&claims, "delete:questions"),
            Err(AuthError::permission_not_found())
        );
    }

    #[test]
    fn test_empty_permission_list_is_unauthorized() {
        let claims = claims_with(Some(vec![]));
        let err = check_permissions(&claims, "get:questions").unwrap_err();
        assert_eq!(err.code(), "unauthorized");
    }

    #[test]
    fn test_missing_permissions_claim() {
        let claims = claims_with(None);
        let err = check_permissions(&claims, "get:questions").unwrap_err();
        assert_eq!(err.code(), "invalid_claims");
        assert_eq!(err, AuthError::permissions_missing());
    }

    #[test]
    fn test_permission_match_is_exact() {
        let claims = claims_with(Some(vec!["get:questions"]));
        assert!(check_permissions(&claims, "get:question").is_err());
        assert!(check_permissions(&claims, "GET:QUESTIONS").is_err());
    }

    #[test]
    fn test_deserialize_audience_list() {
        let json = r#"{
            "sub": "auth0|qa",
            "iss": "https://trivia-test.auth0.com/",
            "aud": ["trivia-api", "https://trivia-test.auth0.com/userinfo"],
            "exp": 1700000000,
            "permissions": ["get:questions"]
        }"#;

        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(
            claims.aud,
            Some(Audience::Many(vec![
                "trivia-api".to_string(),
                "https://trivia-test.auth0.com/userinfo".to_string()
            ]))
        );
        assert_eq!(claims.iat, None);
        assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(1700000000));
    }
}
