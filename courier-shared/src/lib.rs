//! Shared types for the Courier direct-messaging backend.
//!
//! This crate holds everything that both the server and clients agree on:
//! the domain models, the stream event envelope, configuration loading, and
//! the client-side reconciliation reducer that merges durable query results
//! with live-streamed events.

pub mod config;
pub mod models;
pub mod reconcile;
