//! OrderCast Engine
//!
//! The OrderCast engine holds everything about orders that is not HTTP: the order store, the payload normalizer,
//! admin credentials, in-memory sessions and the event hooks that the server fans out to streaming clients.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly; use the public APIs instead. The exception is the data types used in the
//!    database, which are defined in the [`db_types`] module and are public.
//! 2. The engine public API ([`OrderFlowApi`] and [`AuthApi`]). Specific backends need to implement the traits in
//!    [`traits`] in order to serve these APIs.
//! 3. Process-local state ([`sessions`]) and the event hook system ([`events`]). Hooks fire after every successful
//!    order mutation, carrying the freshly re-read order.

pub mod db_types;
pub mod events;
pub mod helpers;
pub mod order_objects;
pub mod sessions;
pub mod traits;

mod oce_api;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{db_url, new_pool, run_migrations, SqliteDatabase};

pub use oce_api::{auth_api::AuthApi, order_flow_api::OrderFlowApi};
pub use traits::{AdminManagement, AuthApiError, OrderFlowError, OrderManagement};
