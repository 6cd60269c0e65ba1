//! Typed clients for the remote user and project services.
//!
//! Task records carry project codes and usernames as opaque strings. These
//! clients are how callers check those references before persisting:
//!
//! - Payload types in [`domain`]
//! - Endpoint paths in [`routes`]
//! - Port contracts in [`ports`]
//! - HTTP and in-memory implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod routes;

pub use ports::{LookupError, LookupResult, ProjectLookup, RemoteService, UserLookup};
