//! # PulsePoint Backend
//!
//! Feedback-analytics backend for the PulsePoint dashboard.
//!
//! This crate provides the data and analytics layer behind the single-page
//! operator UI: client/feedback/form/report records behind a repository
//! abstraction, a pure aggregation engine for charts and dashboard metrics,
//! and an axum REST API for the React frontend.
//!
//! ## Features
//!
//! - **Record storage**: repository pattern over four record kinds, with a
//!   remote record-store backend and an in-memory backend for demo mode
//! - **Aggregation**: rating trend series, client performance rankings,
//!   satisfaction/source distributions, dashboard summary metrics
//! - **Reports**: report lifecycle with an enforced status state machine and
//!   CSV summary rendering
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifiers and Data Transfer Objects (DTOs) for API responses
//! - [`models`]: domain record types shared by all storage backends
//! - [`db`]: repository traits, storage backends, and the service layer
//! - [`services`]: pure aggregation functions consumed by charts and tables
//! - [`routes`]: route-specific data types
//! - [`http`]: axum-based HTTP server and request handlers

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
