//! Courier backend server.
//!
//! The crate is organized around one injectable piece of shared mutable
//! state, the [`hub::BroadcastHub`], plus stateless services over a Postgres
//! pool. The [`server`] module wires everything into an axum router.

pub mod app_state;
pub mod db;
pub mod handlers;
pub mod http;
pub mod hub;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod tracer;
