//! Dashboard shell session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge guard only checks that a credential cookie exists. This module
//! is the authoritative check: every shell mount asks the backend who the
//! session belongs to and evicts to login when it cannot say.

pub mod api;
pub mod bootstrap;
pub mod hint;
pub mod menu;
pub mod nav;

pub use api::{AuthApi, AuthApiError, HttpAuthApi, IdentitySnapshot};
pub use bootstrap::{Navigator, SessionState, ShellEnv, ShellSession};

// =============================================================================
// TEST HELPERS
// =============================================================================
