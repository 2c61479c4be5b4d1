//! Shared utilities for the padel club backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Custom validation logic for booking and scheduling payloads
//! - Cursor-based pagination helpers

pub mod pagination;
pub mod validation;
