use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jsonwebtoken::{
    jwk::{AlgorithmParameters, EllipticCurve, Jwk, JwkSet, KeyAlgorithm},
    Algorithm, DecodingKey,
};
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Minimum age of the cached key set before an unknown `kid` triggers a refetch.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// A public key published by the signing authority, paired with the only
/// algorithm it may be used with.
#[derive(Clone)]
pub struct SigningKey {
    pub key: DecodingKey,
    pub algorithm: Algorithm,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Looks up the verification key for a token's `kid` header.
    async fn find_key(&self, kid: &str) -> AppResult<Option<SigningKey>>;
}

struct CachedKeys {
    keys: HashMap<String, SigningKey>,
    fetched_at: Instant,
}

/// Key source backed by the signing authority's `/.well-known/jwks.json`.
pub struct RemoteJwks {
    http_client: reqwest::Client,
    jwks_url: String,
    ttl: Duration,
    retries: u32,
    min_refresh_interval: Duration,
    cache: RwLock<Option<CachedKeys>>,
    // Held while fetching so concurrent misses share one request.
    refresh: Mutex<()>,
}

impl RemoteJwks {
    pub fn new(jwks_url: String, ttl: Duration, timeout: Duration, retries: u32) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build JWKS client: {}", e)))?;

        Ok(Self {
            http_client,
            jwks_url,
            ttl,
            retries,
            min_refresh_interval: MIN_REFRESH_INTERVAL,
            cache: RwLock::new(None),
            refresh: Mutex::new(()),
        })
    }

    /// Overrides how old the cache must be before an unknown `kid` refetches.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.jwks_url(),
            config.jwks_cache_ttl(),
            config.jwks_fetch_timeout(),
            config.jwks_fetch_retries,
        )
    }

    async fn fetch_once(&self) -> AppResult<HashMap<String, SigningKey>> {
        log::debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .http_client
            .get(&self.jwks_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "JWKS fetch failed with status: {}",
                response.status()
            )));
        }

        let jwk_set: JwkSet = response
            .json()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to parse JWKS: {}", e)))?;

        Ok(parse_jwk_set(&jwk_set))
    }

    async fn fetch_with_retry(&self) -> AppResult<HashMap<String, SigningKey>> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(keys) => return Ok(keys),
                Err(err) if attempt < self.retries => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "JWKS fetch attempt {} failed ({}), retrying in {:?}",
                        attempt + 1,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Answers from the cache when it is fresh enough. `None` means a fetch is needed.
    async fn cached_lookup(&self, kid: &str) -> Option<Option<SigningKey>> {
        let cache = self.cache.read().await;
        let cached = cache.as_ref()?;
        let age = cached.fetched_at.elapsed();
        if age >= self.ttl {
            return None;
        }

        match cached.keys.get(kid) {
            Some(key) => Some(Some(key.clone())),
            None if age < self.min_refresh_interval => Some(None),
            None => None,
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| RETRY_BASE_DELAY.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

#[async_trait]
impl KeySource for RemoteJwks {
    async fn find_key(&self, kid: &str) -> AppResult<Option<SigningKey>> {
        if let Some(found) = self.cached_lookup(kid).await {
            return Ok(found);
        }

        let _refresh = self.refresh.lock().await;
        if let Some(found) = self.cached_lookup(kid).await {
            return Ok(found);
        }

        let keys = self.fetch_with_retry().await?;
        log::info!("Loaded {} signing keys from {}", keys.len(), self.jwks_url);

        let found = keys.get(kid).cloned();
        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        Ok(found)
    }
}

/// Fixed key set, for tests and for deployments that pin their keys.
#[derive(Clone, Default)]
pub struct InMemoryKeySource {
    keys: HashMap<String, SigningKey>,
}

impl InMemoryKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, kid: &str, key: DecodingKey, algorithm: Algorithm) -> Self {
        self.keys
            .insert(kid.to_string(), SigningKey { key, algorithm });
        self
    }

    pub fn with_rsa_pem(self, kid: &str, pem: &[u8]) -> AppResult<Self> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AppError::InternalError(format!("Invalid RSA public key: {}", e)))?;
        Ok(self.with_key(kid, key, Algorithm::RS256))
    }
}

#[async_trait]
impl KeySource for InMemoryKeySource {
    async fn find_key(&self, kid: &str) -> AppResult<Option<SigningKey>> {
        Ok(self.keys.get(kid).cloned())
    }
}

/// Builds the `kid` → key map, skipping keys without an id and keys that are
/// not usable for asymmetric signature verification.
pub fn parse_jwk_set(jwk_set: &JwkSet) -> HashMap<String, SigningKey> {
    let mut keys = HashMap::new();
    for jwk in &jwk_set.keys {
        let Some(kid) = &jwk.common.key_id else {
            log::warn!("JWK missing kid field, skipping");
            continue;
        };
        let Some(algorithm) = signing_algorithm(jwk) else {
            log::warn!("Unsupported algorithm for kid {}, skipping", kid);
            continue;
        };
        match DecodingKey::from_jwk(jwk) {
            Ok(key) => {
                keys.insert(kid.clone(), SigningKey { key, algorithm });
            }
            Err(e) => log::warn!("Failed to create decoding key for kid {}: {}", kid, e),
        }
    }
    keys
}

fn signing_algorithm(jwk: &Jwk) -> Option<Algorithm> {
    if matches!(jwk.algorithm, AlgorithmParameters::OctetKey(_)) {
        return None;
    }

    if let Some(declared) = &jwk.common.key_algorithm {
        return match declared {
            KeyAlgorithm::RS256 => Some(Algorithm::RS256),
            KeyAlgorithm::RS384 => Some(Algorithm::RS384),
            KeyAlgorithm::RS512 => Some(Algorithm::RS512),
            KeyAlgorithm::PS256 => Some(Algorithm::PS256),
            KeyAlgorithm::PS384 => Some(Algorithm::PS384),
            KeyAlgorithm::PS512 => Some(Algorithm::PS512),
            KeyAlgorithm::ES256 => Some(Algorithm::ES256),
            KeyAlgorithm::ES384 => Some(Algorithm::ES384),
            KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
            _ => None,
        };
    }

    match &jwk.algorithm {
        AlgorithmParameters::RSA(_) => Some(Algorithm::RS256),
        AlgorithmParameters::EllipticCurve(params) => match params.curve {
            EllipticCurve::P256 => Some(Algorithm::ES256),
            EllipticCurve::P384 => Some(Algorithm::ES384),
            _ => None,
        },
        AlgorithmParameters::OctetKeyPair(_) => Some(Algorithm::EdDSA),
        AlgorithmParameters::OctetKey(_) => None,
    }
}
