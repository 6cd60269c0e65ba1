//! Step definitions for task registration scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
