//! In-memory session store for the login gate.
//!
//! Sessions are random 128-bit tokens held server-side with a creation
//! timestamp; the browser carries the token in an `HttpOnly` cookie.
//! Nothing persists across restarts, which is the right lifetime for a
//! demo gate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "playbill_session";

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Mint a new session and return its token.
    pub fn create(&self) -> String {
        let token = format!("{:032x}", rand::rng().random::<u128>());
        if let Ok(mut sessions) = self.inner.lock() {
            sessions.insert(token.clone(), Instant::now());
        }
        token
    }

    /// True if the token names a live session. Expired entries are
    /// swept on the way through.
    pub fn validate(&self, token: &str) -> bool {
        let Ok(mut sessions) = self.inner.lock() else {
            return false;
        };
        let ttl = self.ttl;
        sessions.retain(|_, created| created.elapsed() < ttl);
        sessions.contains_key(token)
    }

    /// Destroy a session. Unknown tokens are a no-op.
    pub fn remove(&self, token: &str) {
        if let Ok(mut sessions) = self.inner.lock() {
            sessions.remove(token);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// Pull the session token out of a `Cookie` request header.
pub fn token_from_cookies(header: Option<&str>) -> Option<&str> {
    let header = header?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// `Set-Cookie` value installing a session token.
pub fn set_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_validate_remove_roundtrip() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.create();
        assert!(store.validate(&token));
        store.remove(&token);
        assert!(!store.validate(&token));
    }

    #[test]
    fn expired_sessions_are_swept() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.create();
        assert!(!store.validate(&token));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_ne!(store.create(), store.create());
    }

    #[test]
    fn cookie_header_parsing_finds_the_session() {
        assert_eq!(
            token_from_cookies(Some("theme=dark; playbill_session=abc123; other=1")),
            Some("abc123")
        );
        assert_eq!(token_from_cookies(Some("theme=dark")), None);
        assert_eq!(token_from_cookies(None), None);
    }
}
