//! # OrderCast server
//! This crate hosts the HTTP surface of OrderCast. It is responsible for:
//! * Taking in customer order submissions and handing them to the engine.
//! * Authenticating staff and issuing session tokens.
//! * Fanning order lifecycle events out to streaming admin clients.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `POST /orders`: customer order intake.
//! * `POST /admin/login`: credential check, issues a session token.
//! * `GET /admin/orders`: all orders, newest first (bearer token required).
//! * `PATCH /admin/orders/{id}/status`: status change (bearer token required).
//! * `GET /admin/orders/stream`: long-lived event stream (token as query parameter).
//! * `GET /health`: liveness probe.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod event_stream;
pub mod routes;
pub mod server;
pub mod sweep_worker;

#[cfg(test)]
mod endpoint_tests;
