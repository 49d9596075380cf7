//! Orrery: HTTPS asset server for 3D model files.
//!
//! Serves a directory of `.glb` models over HTTP(S) and ships a companion
//! self-signed certificate generator for local development.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod tls;

pub use api::{create_router, ApiState, ErrorResponse, ListModelsResponse};
pub use config::Config;
pub use error::{CertError, ConfigError, OrreryError, Result, StoreError};
pub use server::run_server;
pub use store::{ModelStore, Resolved};
pub use tls::{generate_self_signed, CertOptions, GeneratedCert, CERT_FILE, KEY_FILE};
