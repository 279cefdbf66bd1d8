//! Registries implementing the dashboard's operations.
//!
//! Each module adds methods to `DeskService` via `impl DeskService` blocks.

pub mod audit;
pub mod company;
pub mod news;
