//! TLS certificate generation for local HTTPS development.
//!
//! Produces a self-signed certificate/key pair the server can load to
//! terminate TLS without a third-party certificate authority.

mod cert_gen;

pub use cert_gen::{generate_self_signed, CertOptions, GeneratedCert, CERT_FILE, KEY_FILE};
