//! Route protection for the dashboard area.
//!
//! Pages under `/dashboard`, `/profile` and `/settings` require a session.
//! Unauthenticated visitors are sent to the login page with the original
//! path preserved in `callbackUrl`.

use crate::auth::session::SessionStore;

/// Path prefixes that require a signed-in user.
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/profile", "/settings"];

/// The outcome of a route check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// Render the requested page.
    Allow,
    /// Navigate to this location instead.
    Redirect(String),
}

/// Decides whether a path may be rendered for the current session.
///
/// # Example
///
/// ```rust
/// use account_api::{Credential, SessionStore};
/// use account_api::auth::{Access, RouteGuard};
///
/// let store = SessionStore::default();
/// let guard = RouteGuard::new(store.clone(), "/login");
///
/// assert_eq!(
///     guard.check("/settings/profile"),
///     Access::Redirect("/login?callbackUrl=%2Fsettings%2Fprofile".to_string())
/// );
///
/// store.establish(Credential::new(1, "T1")).unwrap();
/// assert_eq!(guard.check("/settings/profile"), Access::Allow);
/// ```
#[derive(Clone, Debug)]
pub struct RouteGuard {
    session: SessionStore,
    login_path: String,
}

impl RouteGuard {
    /// Creates a guard reading from `session` and redirecting to `login_path`.
    #[must_use]
    pub fn new(session: SessionStore, login_path: impl Into<String>) -> Self {
        Self {
            session,
            login_path: login_path.into(),
        }
    }

    /// Returns `true` if `path` requires a session.
    #[must_use]
    pub fn is_protected(path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        PROTECTED_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Checks `path` against the current session.
    #[must_use]
    pub fn check(&self, path: &str) -> Access {
        if !Self::is_protected(path) || self.session.is_authenticated() {
            return Access::Allow;
        }

        tracing::debug!(path, "Redirecting unauthenticated visitor to login");
        Access::Redirect(format!(
            "{}?callbackUrl={}",
            self.login_path,
            urlencoding::encode(path)
        ))
    }
}
