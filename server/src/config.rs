//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default session lifetime: long enough for a demo session, short
/// enough that a shared machine does not stay unlocked overnight.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// Everything the content server needs to run.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP address to bind.
    pub bind: SocketAddr,
    /// Directory holding `scenarios/` and `public/`.
    pub content_dir: PathBuf,
    /// Access-code allow-list. Empty disables the login gate entirely
    /// (local demo mode).
    pub access_codes: Vec<String>,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            content_dir: PathBuf::from("content"),
            access_codes: Vec::new(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl ServerConfig {
    pub fn scenarios_dir(&self) -> PathBuf {
        self.content_dir.join("scenarios")
    }

    pub fn public_dir(&self) -> PathBuf {
        self.content_dir.join("public")
    }

    /// Whether page and API access require a session.
    pub fn gate_enabled(&self) -> bool {
        !self.access_codes.is_empty()
    }

    /// Allow-list membership check. Plain string comparison; the codes
    /// are shared demo secrets, not credentials.
    pub fn code_allowed(&self, code: &str) -> bool {
        self.access_codes.iter().any(|c| c == code)
    }
}
