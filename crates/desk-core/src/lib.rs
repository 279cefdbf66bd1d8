//! # desk-core
//!
//! Core types and pure logic for auditdesk.
//!
//! This crate provides the foundational types shared across all auditdesk crates:
//! - Entity structs for companies, users, audits, and news items
//! - The three-valued audit status enum and the user role enum
//! - Field-level validation errors and cross-cutting error types
//! - Calendar-date and text validation helpers
//! - JSON response shapes for statistics and pagination
//! - The aggregation engine deriving status and company breakdowns

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod stats;
pub mod validation;
