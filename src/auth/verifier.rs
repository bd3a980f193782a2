use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, Validation};

use crate::{
    auth::{AuthError, Claims, KeySource},
    config::Config,
    errors::{AppError, AppResult},
};

/// Pulls the raw token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(AuthError::missing_header)?;
    let parts: Vec<&str> = header.split_whitespace().collect();

    match parts.as_slice() {
        [scheme, _] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [_, token] => Ok(*token),
        [_] => Err(AuthError::invalid_header("Token not found.")),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Verifies access tokens issued by the configured signing authority.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(keys: Arc<dyn KeySource>, issuer: String, audience: String) -> Self {
        Self {
            keys,
            issuer,
            audience,
            leeway: 0,
        }
    }

    /// Accepts tokens up to `secs` seconds past their `exp`. Defaults to 0.
    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway = secs;
        self
    }

    pub fn from_config(keys: Arc<dyn KeySource>, config: &Config) -> Self {
        Self::new(keys, config.issuer(), config.api_audience.clone())
            .with_leeway(config.jwt_leeway_secs)
    }

    /// Checks signature, expiry, audience and issuer and returns the claims.
    ///
    /// Only `AppError::Auth` is returned for problems with the token itself;
    /// a key source that cannot be reached surfaces as an internal error.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token).map_err(|_| AuthError::unparsable_token())?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_header("Authorization malformed."))?;

        if !is_asymmetric(header.alg) {
            return Err(AuthError::unknown_key().into());
        }

        let signing_key = self
            .keys
            .find_key(&kid)
            .await?
            .ok_or_else(AuthError::unknown_key)?;

        // The key decides the algorithm; a header asking for anything else is refused.
        if signing_key.algorithm != header.alg {
            log::warn!(
                "Token algorithm {:?} does not match key {} ({:?})",
                header.alg,
                kid,
                signing_key.algorithm
            );
            return Err(AuthError::unknown_key().into());
        }

        let mut validation = Validation::new(signing_key.algorithm);
        validation.leeway = self.leeway;
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        let token_data = decode::<Claims>(token, &signing_key.key, &validation)
            .map_err(|e| AppError::from(classify(e.kind())))?;

        Ok(token_data.claims)
    }
}

fn is_asymmetric(alg: Algorithm) -> bool {
    !matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
            AuthError::incorrect_claims()
        }
        _ => AuthError::unparsable_token(),
    }
}
