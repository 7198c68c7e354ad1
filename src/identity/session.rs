use std::sync::Arc;

use base64::Engine;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::{PortalError, PortalResult};
use crate::storage::LocalStore;
use crate::tprintln;

use super::provider::AuthProvider;
use super::user::User;

/// Storage keys the portal has always used; a profile written by an older
/// build restores here unchanged.
pub const TOKEN_KEY: &str = "school_portal_token";
pub const USER_KEY: &str = "school_portal_user";

/// Live binding between an opaque token and the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Authentication phase as seen by the gate. `Pending` holds from
/// construction until persisted state has been read once, so routing can
/// show a loading view instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Pending,
    SignedOut,
    SignedIn(Session),
}

impl SessionPhase {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionPhase::SignedIn(s) => Some(&s.user),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionPhase::SignedIn(_))
    }
}

fn mint_token() -> String {
    // 128-bit random token base64url without padding
    let mut buf = [0u8; 16];
    let _ = getrandom::getrandom(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Owns the single active session slot. Credentials are validated through
/// the injected provider; `{token, user}` are written through to the injected
/// store so the session survives restarts.
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn LocalStore>,
    slot: RwLock<SessionPhase>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<dyn LocalStore>) -> Self {
        Self { provider, store, slot: RwLock::new(SessionPhase::Pending) }
    }

    /// Read persisted state and settle the slot. Runs once at startup;
    /// running it again simply re-reads.
    ///
    /// Corrupt or half-written state is not an error: the stored entries are
    /// cleared and the slot settles signed-out.
    pub fn restore(&self) -> SessionPhase {
        let phase = match self.store.get(TOKEN_KEY) {
            None => SessionPhase::SignedOut,
            Some(token) => match self.store.get(USER_KEY) {
                Some(raw) => match serde_json::from_str::<User>(&raw) {
                    Ok(user) => SessionPhase::SignedIn(Session { token, user }),
                    Err(e) => {
                        warn!(target: "session", "stored user record is malformed: {}; signing out", e);
                        self.clear_persisted();
                        SessionPhase::SignedOut
                    }
                },
                None => {
                    warn!(target: "session", "stored token without user record; signing out");
                    self.clear_persisted();
                    SessionPhase::SignedOut
                }
            },
        };
        if let SessionPhase::SignedIn(s) = &phase {
            info!(target: "session", "restored session for {} role={}", s.user.email, s.user.role);
        }
        *self.slot.write() = phase.clone();
        phase
    }

    /// Authenticate and open a session. On failure the previous slot value,
    /// signed in or not, is left untouched.
    pub fn login(&self, email: &str, password: &str) -> PortalResult<User> {
        let user = self.provider.authenticate(email, password)?;
        let token = mint_token();
        let raw = serde_json::to_string(&user)
            .map_err(|e| PortalError::storage(e.to_string()))?;
        self.store.put(TOKEN_KEY, &token)?;
        self.store.put(USER_KEY, &raw)?;
        *self.slot.write() = SessionPhase::SignedIn(Session { token, user: user.clone() });
        info!(target: "session", "login {} role={}", user.email, user.role);
        Ok(user)
    }

    /// Close the session and clear persisted state. Safe to call repeatedly,
    /// signed in or not.
    pub fn logout(&self) {
        self.clear_persisted();
        *self.slot.write() = SessionPhase::SignedOut;
        tprintln!("session.logout");
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(target: "session", "failed to clear stored token: {}", e);
        }
        if let Err(e) = self.store.remove(USER_KEY) {
            warn!(target: "session", "failed to clear stored user: {}", e);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.slot.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().is_signed_in()
    }

    /// Bearer token for the data layer, only while signed in.
    pub fn token(&self) -> Option<String> {
        match &*self.slot.read() {
            SessionPhase::SignedIn(s) => Some(s.token.clone()),
            _ => None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.slot.read().clone()
    }
}
