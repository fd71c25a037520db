//! Bearer token storage
//!
//! This module persists the bearer token between invocations, either in a
//! JSON file under the user config directory or in memory only. The token is
//! cached after the first load so request building never touches the disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::utils::errors::Result;

/// Token record as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    loaded: bool,
    token: Option<StoredToken>,
}

/// Bearer token storage shared by the API client and the session
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: Option<PathBuf>,
    slot: Arc<RwLock<Slot>>,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

impl TokenStorage {
    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            path: None,
            slot: Arc::new(RwLock::new(Slot {
                loaded: true,
                token: None,
            })),
        }
    }

    /// Storage backed by a JSON file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            slot: Arc::new(RwLock::new(Slot::default())),
        }
    }

    /// Pick file or memory storage from the auth settings
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.token_path() {
            Some(path) => Self::file(path),
            None => Self::in_memory(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current token, loading it from disk on first use.
    ///
    /// Expired JWTs are dropped, their file removed, and treated as absent.
    pub async fn current(&self) -> Result<Option<String>> {
        {
            let slot = self.slot.read().await;
            if slot.loaded {
                let usable = Self::usable(slot.token.as_ref());
                if usable.is_some() || slot.token.is_none() {
                    return Ok(usable);
                }
            }
        }

        let mut slot = self.slot.write().await;
        if !slot.loaded {
            slot.token = self.read_file().await?;
            slot.loaded = true;
        }

        let usable = Self::usable(slot.token.as_ref());
        if usable.is_none() && slot.token.is_some() {
            warn!("Stored token has expired, discarding it");
            slot.token = None;
            self.remove_file().await?;
        }
        Ok(usable)
    }

    /// Persist a new token
    pub async fn save(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let serialized = serde_json::to_vec_pretty(&stored)?;
            tokio::fs::write(path, serialized).await?;
            debug!(path = %path.display(), "Token saved to file");
        }

        let mut slot = self.slot.write().await;
        slot.token = Some(stored);
        slot.loaded = true;
        Ok(())
    }

    /// Forget the token, on logout or after a 401
    pub async fn clear(&self) -> Result<()> {
        let mut slot = self.slot.write().await;
        slot.token = None;
        slot.loaded = true;
        self.remove_file().await
    }

    fn usable(stored: Option<&StoredToken>) -> Option<String> {
        let stored = stored?;
        match token_expiry(&stored.token) {
            Some(expiry) if expiry <= Utc::now() => None,
            _ => Some(stored.token.clone()),
        }
    }

    async fn read_file(&self) -> Result<Option<StoredToken>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        match tokio::fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice::<StoredToken>(&bytes) {
                Ok(stored) => {
                    debug!(path = %path.display(), "Loaded token from file");
                    Ok(Some(stored))
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring unreadable token file");
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_file(&self) -> Result<()> {
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!(path = %path.display(), "Token file removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Read the `exp` claim of a JWT without verifying its signature.
///
/// Opaque (non-JWT) tokens and tokens without `exp` return `None`.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    data.claims.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
}
