//! Task service: task records for a project-management system.
//!
//! The crate stores tasks that refer to projects, employees and managers
//! owned by two remote services, and checks those references over HTTP
//! before a task is persisted.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, persistence and lifecycle orchestration
//! - [`lookup`]: User and project service clients
//! - [`entity`]: Identifier, timestamps and soft-delete flag shared by records
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod entity;
pub mod lookup;
pub mod task;
pub mod telemetry;
