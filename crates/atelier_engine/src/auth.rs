//! Admin session gate.
//!
//! A single shared secret and an opaque flag on the `auth` slice. This is
//! deliberately not an authentication system; it only keeps the admin
//! commands behind the same static check the site's login form uses.

use atelier_core::{Storage, AUTH_KEY};
use site_logging::site_info;

const SESSION_FLAG: &str = "true";

/// Compares `attempt` against the shared secret and, on a match, marks the
/// session authenticated. Returns whether the attempt succeeded.
pub fn login(storage: &mut dyn Storage, secret: &str, attempt: &str) -> bool {
    if attempt == secret {
        storage.set(AUTH_KEY, SESSION_FLAG);
        site_info!("Admin session opened");
        true
    } else {
        false
    }
}

/// Whether an admin session flag is present.
pub fn is_authenticated(storage: &dyn Storage) -> bool {
    storage.get(AUTH_KEY).as_deref() == Some(SESSION_FLAG)
}

/// Clears the session flag.
pub fn logout(storage: &mut dyn Storage) {
    storage.remove(AUTH_KEY);
    site_info!("Admin session closed");
}
