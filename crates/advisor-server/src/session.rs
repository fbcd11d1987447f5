//! Server-side sessions keyed by an opaque cookie id
//!
//! A session holds the last submitted search and pending flash messages.
//! Entries expire `ttl` after their last use.

use advisor_shop::SearchSelection;
use axum::http::{HeaderMap, HeaderValue, header};
use cached::{Cached, TimedCache};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "advisor_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    last_search: Option<SearchSelection>,
    flashes: Vec<Flash>,
}

/// Opaque session identifier carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Read the id from the request cookies, if present and well formed
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value)
            .filter(|value| Uuid::try_parse(value).is_ok())
            .map(|value| Self(value.to_string()))
    }

    /// Existing id from the request, or a fresh one
    pub fn from_headers_or_new(headers: &HeaderMap) -> Self {
        Self::from_headers(headers).unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value for this id
    pub fn cookie(&self, ttl: Duration) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.0,
            ttl.as_secs()
        ))
        .ok()
    }
}

/// Expiring in-memory session store, cheap to clone
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<TimedCache<SessionId, SessionData>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(TimedCache::with_lifespan_and_refresh(ttl, true))),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn update<F>(&self, id: &SessionId, f: F)
    where
        F: FnOnce(&mut SessionData),
    {
        let mut sessions = self.sessions.write().await;
        // Every write may create a session; drop the expired ones first
        sessions.flush();
        let mut data = sessions.cache_remove(id).unwrap_or_default();
        f(&mut data);
        let _ = sessions.cache_set(id.clone(), data);
    }

    /// Replace the stored search
    pub async fn store_search(&self, id: &SessionId, selection: SearchSelection) {
        self.update(id, |data| data.last_search = Some(selection)).await;
    }

    /// The stored search, left in place for reloads
    pub async fn last_search(&self, id: &SessionId) -> Option<SearchSelection> {
        let mut sessions = self.sessions.write().await;
        sessions
            .cache_get(id)
            .and_then(|data| data.last_search.clone())
    }

    pub async fn flash(&self, id: &SessionId, flash: Flash) {
        self.update(id, |data| data.flashes.push(flash)).await;
    }

    /// Pending flash messages; each is returned once
    pub async fn take_flashes(&self, id: &SessionId) -> Vec<Flash> {
        let mut sessions = self.sessions.write().await;
        sessions
            .cache_get_mut(id)
            .map(|data| std::mem::take(&mut data.flashes))
            .unwrap_or_default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.cache_size()
    }
}
