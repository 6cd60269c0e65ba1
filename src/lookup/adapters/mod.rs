//! Adapter implementations for the lookup ports.

pub mod http;
pub mod memory;

pub use http::{HttpProjectLookup, HttpUserLookup, RemoteServiceClient};
pub use memory::{InMemoryProjectDirectory, InMemoryUserDirectory};
