//! # Admin Core
//!
//! Core logic of the clinic admin console.
//!
//! This crate contains the screen-level behaviour of the console, independent of how it is
//! displayed:
//! - Wire models for doctors, patients and dashboard reports
//! - The per-screen entity list store and the search/sort query view
//! - Screen controllers with fetch-on-mount, fallback data and delete confirmation
//! - An `AdminApi` trait with a reqwest-backed implementation
//!
//! **No display concerns**: terminal output lives in the `clinic-admin` binary, and the local
//! development API lives in `admin-api-stub`.

pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod fallback;
pub mod models;
pub mod presentation;
pub mod query;
pub mod screen;
pub mod store;

#[cfg(test)]
mod testing;

pub use client::{AdminApi, HttpAdminApi};
pub use config::{ConsoleConfig, DeleteMode};
pub use controller::{DeleteOutcome, DoctorScreen, PatientScreen, RemoteDelete, ScreenController};
pub use dashboard::DashboardController;
pub use error::{AdminError, AdminResult, FetchErrorKind};
pub use fallback::{FallbackDataProvider, StaticFallback};
pub use screen::{FetchFailure, Phase};
