//! Wanderhub admin dashboard core.
//!
//! This crate implements the data synchronization and mutation-reconciliation
//! flow behind the Wanderhub admin UI. It is deliberately headless: rendering,
//! routing, and token storage live in the embedding application. What lives
//! here is everything between a user action and consistent view state:
//!
//! - [`api`] - Typed client for the travel REST backend
//! - [`session`] - Process-wide authenticated identity and the admin guard
//! - [`dashboard`] - The [`Dashboard`](dashboard::Dashboard) orchestrator:
//!   initial load, manual refresh, and all mutation handlers
//! - [`review`] - Single-shot review submission with local validation
//! - [`status`] - The transient auto-dismissing status banner
//! - [`state`] - View state and statistics projections
//! - [`config`] - Environment-based configuration
//!
//! # Data flow
//!
//! The session guard gates everything. After a successful mount, the
//! synchronizer brings view state in line with the backend in two independent
//! layers: one aggregate statistics fetch and three per-entity list fetches
//! issued concurrently. Every successful mutation re-runs the relevant layer.
//! There is no polling and no push channel; all movement is request/response.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod review;
pub mod session;
pub mod state;
pub mod status;

mod sync;

pub use api::{ApiError, HttpTravelClient, TravelApi};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Confirm, Dashboard};
pub use review::ReviewForm;
pub use session::{SessionGuardError, SessionStore};
pub use state::{AdminMetrics, DashboardView, UserBreakdown};
pub use status::{StatusKind, StatusMessage, StatusSlot};
