//! Authentication and session types.
//!
//! # Overview
//!
//! - [`Credential`]: The signed-in user plus bearer token
//! - [`CredentialPatch`]: A partial update after profile or avatar changes
//! - [`SessionStore`]: The shared, observable slot holding the credential
//! - [`SessionClaims`]: The signed session token payload
//! - [`RouteGuard`]: Redirects unauthenticated visitors away from protected pages
//! - [`ResetLink`]: Token and email parsed from a password reset link
//!
//! # Credential Lifecycle
//!
//! A credential is established after login (or registration followed by
//! login), patched after profile edits, has its token rotated by the
//! request client's refresh path, and is destroyed on sign-out, on a failed
//! refresh, or when it outlives the session's maximum age.
//!
//! # Example
//!
//! ```rust
//! use account_api::{Credential, SessionStore};
//!
//! let store = SessionStore::default();
//! store.establish(Credential::new(1, "T1")).unwrap();
//! assert_eq!(store.bearer_token().as_deref(), Some("T1"));
//! ```

mod credential;
mod error;
mod guard;
mod reset_link;
pub mod session;
mod session_token;

pub use credential::{Credential, CredentialPatch};
pub use error::{AuthError, SessionError};
pub use guard::{Access, RouteGuard, PROTECTED_PREFIXES};
pub use reset_link::ResetLink;
pub use session::{ExpiryReason, SessionEvent, SessionStore};
pub use session_token::SessionClaims;
