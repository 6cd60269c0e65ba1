//! Task records and their lifecycle.
//!
//! A task references a project, an employee and a manager by plain string
//! codes. Those references are checked through the lookup ports before a
//! task is stored; the repository itself enforces only that a task code is
//! unique among active (not soft-deleted) records. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
