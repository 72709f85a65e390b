//! Session store writes shared by flows and handlers.

use crate::domain::account::AuthToken;
use crate::ports::SessionStore;

/// Stores a fresh token. The in-memory copy survives a failed write.
pub(crate) fn store_token(session: &dyn SessionStore, token: AuthToken) {
    if let Err(e) = session.set_token(token) {
        tracing::warn!(error = %e, "Failed to persist session token");
    }
}

/// Drops the stored token after a service rejected it.
pub(crate) fn clear_session(session: &dyn SessionStore) {
    tracing::info!("Session rejected by service; signing out");
    if let Err(e) = session.clear() {
        tracing::warn!(error = %e, "Failed to clear persisted session token");
    }
}
