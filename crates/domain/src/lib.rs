//! Domain layer for the padel club backend.
//!
//! This crate contains:
//! - Domain models (Club, Court, Instructor, User, TimeSlot, Booking)
//! - Request/response payloads with validation rules
//! - Pure scheduling and booking-confirmation services

pub mod models;
pub mod services;
