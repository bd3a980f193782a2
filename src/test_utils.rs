#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Category, Question};

    /// Creates a question filed under `category`
    pub fn question(id: i64, category: &str) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            category: category.to_string(),
            difficulty: 2,
        }
    }

    /// The six categories the trivia client ships with
    pub fn categories() -> Vec<Category> {
        ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
            .iter()
            .enumerate()
            .map(|(i, kind)| Category::new(i as i64 + 1, kind))
            .collect()
    }
}

#[cfg(test)]
pub mod tokens {
    use std::sync::Arc;

    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    use crate::auth::{InMemoryKeySource, TokenVerifier};

    pub const PRIVATE_KEY: &[u8] = include_bytes!("../tests/fixtures/rsa_private.pem");
    pub const OTHER_PRIVATE_KEY: &[u8] = include_bytes!("../tests/fixtures/rsa_other_private.pem");
    pub const PUBLIC_KEY: &[u8] = include_bytes!("../tests/fixtures/rsa_public.pem");
    pub const KID: &str = "trivia-test-key";
    pub const ISSUER: &str = "https://trivia-test.auth0.com/";
    pub const AUDIENCE: &str = "trivia-api";

    pub fn verifier() -> TokenVerifier {
        let keys = InMemoryKeySource::new()
            .with_rsa_pem(KID, PUBLIC_KEY)
            .expect("test public key should parse");
        TokenVerifier::new(Arc::new(keys), ISSUER.to_string(), AUDIENCE.to_string())
    }

    /// Claims accepted by [`verifier`], valid for an hour
    pub fn valid_claims(permissions: &[&str]) -> serde_json::Value {
        json!({
            "sub": "auth0|tester",
            "iss": ISSUER,
            "aud": AUDIENCE,
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
            "permissions": permissions,
        })
    }

    pub fn sign(claims: &serde_json::Value, key: &[u8], kid: Option<&str>) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(String::from);
        let key = EncodingKey::from_rsa_pem(key).expect("test private key should parse");
        encode(&header, claims, &key).expect("test token should encode")
    }

    pub fn bearer(claims: &serde_json::Value) -> String {
        format!("Bearer {}", sign(claims, PRIVATE_KEY, Some(KID)))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_categories() {
        let categories = categories();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }

    #[test]
    fn test_fixtures_question() {
        let question = question(3, "2");
        assert_eq!(question.id, 3);
        assert_eq!(question.category, "2");
    }
}
