pub mod auth_api;
pub mod order_flow_api;
