// Provider signing-key cache. The identity provider rotates its RS256 keys;
// we fetch the published JWK set over HTTPS and cache it in-process with a
// TTL, refreshing on expiry or on sight of an unknown kid.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use super::IdentityError;
use crate::config;

/// RSA public-key components of one provider signing key
#[derive(Clone, Debug)]
pub struct ProviderKey {
    pub n: String,
    pub e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

struct KeyStore {
    cache: RwLock<CachedKeys>,
}

#[derive(Default)]
struct CachedKeys {
    keys: HashMap<String, ProviderKey>,
    fetched_at: Option<DateTime<Utc>>,
}

impl CachedKeys {
    fn is_fresh(&self, ttl_secs: u64) -> bool {
        match self.fetched_at {
            Some(at) => Utc::now() < at + Duration::seconds(ttl_secs as i64),
            None => false,
        }
    }
}

fn store() -> &'static KeyStore {
    static INSTANCE: OnceLock<KeyStore> = OnceLock::new();
    INSTANCE.get_or_init(|| KeyStore {
        cache: RwLock::new(CachedKeys::default()),
    })
}

/// Look up the signing key for `kid`, refreshing the cached key set when it
/// is stale or does not know the kid (provider rotation).
pub async fn signing_key(kid: &str) -> Result<ProviderKey, IdentityError> {
    let ttl = config::config().identity.key_ttl_secs;
    let store = store();

    // Fast path: fresh cache that knows the kid
    {
        let cache = store.cache.read().await;
        if cache.is_fresh(ttl) {
            if let Some(key) = cache.keys.get(kid) {
                return Ok(key.clone());
            }
        }
    }

    refresh(store).await?;

    let cache = store.cache.read().await;
    cache
        .keys
        .get(kid)
        .cloned()
        .ok_or_else(|| IdentityError::UnknownKey(kid.to_string()))
}

async fn refresh(store: &KeyStore) -> Result<(), IdentityError> {
    let url = &config::config().identity.jwk_url;

    let response = reqwest::get(url)
        .await
        .map_err(|e| IdentityError::KeyFetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(IdentityError::KeyFetch(format!(
            "key endpoint returned {}",
            response.status()
        )));
    }

    let jwks: JwkSet = response
        .json()
        .await
        .map_err(|e| IdentityError::KeyFetch(format!("malformed key set: {}", e)))?;

    let mut cache = store.cache.write().await;
    cache.keys = jwks
        .keys
        .into_iter()
        .map(|k| (k.kid, ProviderKey { n: k.n, e: k.e }))
        .collect();
    cache.fetched_at = Some(Utc::now());

    info!("Refreshed {} provider signing keys", cache.keys.len());
    Ok(())
}
