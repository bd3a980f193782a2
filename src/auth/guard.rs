use crate::{
    auth::{bearer_token, check_permissions, Claims, TokenVerifier},
    errors::AppResult,
};

/// Bearer-token authorization for a single required permission.
///
/// Runs header extraction, token verification and the permission check in
/// that order and stops at the first failure.
#[derive(Clone)]
pub struct AuthGuard {
    verifier: TokenVerifier,
}

impl AuthGuard {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    pub async fn authorize(&self, header: Option<&str>, permission: &str) -> AppResult<Claims> {
        let token = bearer_token(header)?;
        let claims = self.verifier.verify(token).await?;
        check_permissions(&claims, permission)?;

        log::debug!(
            "Granted {} to {} (token expires {:?})",
            permission,
            claims.sub,
            claims.expires_at()
        );
        Ok(claims)
    }
}
