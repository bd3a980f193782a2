use std::{env, time::Duration};

use secrecy::SecretString;

/// Upper bound for `JWKS_FETCH_RETRIES`.
pub const MAX_JWKS_FETCH_RETRIES: u32 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: SecretString,
    pub database_name: String,
    pub auth0_domain: String,
    pub api_audience: String,
    pub client_id: String,
    pub callback_url: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwks_cache_ttl_secs: u64,
    pub jwks_fetch_timeout_secs: u64,
    pub jwks_fetch_retries: u32,
    /// Clock-skew allowance applied to `exp`, in seconds.
    pub jwt_leeway_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: SecretString::from(
                env::var("DATABASE_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "trivia".to_string()),
            auth0_domain: env::var("AUTH0_DOMAIN").unwrap_or_else(|_| "trivia.us.auth0.com".to_string()),
            api_audience: env::var("API_AUDIENCE").unwrap_or_else(|_| "trivia".to_string()),
            client_id: env::var("CLIENT_ID").unwrap_or_default(),
            callback_url: env::var("CALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:8080/".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT").unwrap_or(8080),
            jwks_cache_ttl_secs: parse_var("JWKS_CACHE_TTL_SECS").unwrap_or(600),
            jwks_fetch_timeout_secs: parse_var("JWKS_FETCH_TIMEOUT_SECS").unwrap_or(5),
            jwks_fetch_retries: parse_var("JWKS_FETCH_RETRIES")
                .unwrap_or(2)
                .min(MAX_JWKS_FETCH_RETRIES),
            jwt_leeway_secs: parse_var("JWT_LEEWAY_SECS").unwrap_or(0),
        }
    }

    /// Expected `iss` claim. Auth0 issues tokens with a trailing slash.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth0_domain)
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.auth0_domain)
    }

    /// Login page on the signing authority that hands out role tokens.
    pub fn login_url(&self) -> String {
        format!(
            "https://{}/authorize?audience={}&response_type=token&client_id={}&redirect_uri={}",
            self.auth0_domain, self.api_audience, self.client_id, self.callback_url
        )
    }

    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    pub fn jwks_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.jwks_fetch_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            database_url: SecretString::from("mongodb://localhost:27017".to_string()),
            database_name: "trivia-test".to_string(),
            auth0_domain: "trivia-test.auth0.com".to_string(),
            api_audience: "trivia-api".to_string(),
            client_id: "test-client".to_string(),
            callback_url: "http://127.0.0.1:8080/".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwks_cache_ttl_secs: 600,
            jwks_fetch_timeout_secs: 5,
            jwks_fetch_retries: 2,
            jwt_leeway_secs: 0,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
