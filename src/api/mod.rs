//! HTTP API module for the model file server.
//!
//! Exposes the model listing and download endpoints over a router built once
//! at startup.

mod handlers;
mod rest;

pub use handlers::*;
pub use rest::*;
