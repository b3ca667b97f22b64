//! # Clinic Booking
//!
//! Lifecycle operations for clinic appointments: create, update, cancel and
//! status changes, plus the schedule and statistics queries layered on the
//! appointment store.
//!
//! ## Architecture
//!
//! - **Controller**: parses loosely-typed form data into typed requests
//! - **Lifecycle**: business rules composed of validation + store mutations
//! - **Stats**: aggregation over stored appointments
//! - **Config**: environment-based configuration
//!
//! Any outer surface (HTTP handler, page script, CLI) is a caller of
//! [`lifecycle::BookingService`]; none ships with this workspace.

/// Configuration loaded from the environment
pub mod config;
/// Form-data validation before any domain entity is built
pub mod controller;
/// Business operations over the appointment store
pub mod lifecycle;
/// Aggregated appointment statistics
pub mod stats;
