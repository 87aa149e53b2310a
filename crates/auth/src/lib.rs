//! `printstock-auth`: role-based access to the stock API.
//!
//! Decoupled from HTTP and from durable storage: credentials are checked by an
//! injected [`CredentialVerifier`] and sessions live in an injected
//! [`SessionStore`].

pub mod authorize;
pub mod credentials;
pub mod gate;
pub mod roles;
pub mod session;

pub use authorize::{authorize, AuthzError, RoleRequirement};
pub use credentials::{CredentialVerifier, SecretCredentials};
pub use gate::{AccessGate, AuthError, DEFAULT_SESSION_TTL_HOURS};
pub use roles::Role;
pub use session::{validate_session, InMemorySessionStore, Session, SessionStore, SessionValidationError};
