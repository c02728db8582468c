//! Clipforge page server: edge access guard, dashboard shell session, and
//! the router that puts them in front of the marketing site.

pub mod compat;
pub mod config;
pub mod guard;
pub mod paths;
pub mod routes;
pub mod session;
pub mod state;
