//! Backend traits for the OrderCast engine.
//!
//! Storage backends implement these traits; the public APIs ([`crate::OrderFlowApi`], [`crate::AuthApi`]) are
//! generic over them, which is also what lets the server's endpoint tests swap in mocks.

mod admin_management;
mod order_management;

pub use admin_management::{AdminManagement, AuthApiError};
pub use order_management::{OrderFlowError, OrderManagement};
