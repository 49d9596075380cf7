//! Self-signed certificate generation.
//!
//! Generates a fresh 2048-bit RSA key pair and a one-year self-signed
//! certificate covering localhost plus a configurable LAN address, so mobile
//! clients on the same network can connect over HTTPS during development.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use rcgen::{CertificateParams, DnType, KeyPair, RsaKeySize, SanType};
use tracing::debug;

use crate::error::CertError;

/// File name the certificate is written under.
pub const CERT_FILE: &str = "cert.pem";
/// File name the private key is written under.
pub const KEY_FILE: &str = "key.pem";

/// Certificate validity in days.
const VALIDITY_DAYS: i64 = 365;

/// Options for certificate generation.
#[derive(Debug, Clone)]
pub struct CertOptions {
    /// LAN address the certificate covers alongside localhost.
    pub ip: Ipv4Addr,
}

impl Default for CertOptions {
    fn default() -> Self {
        Self {
            ip: Ipv4Addr::new(192, 168, 1, 2),
        }
    }
}

/// Generated certificate and key pair.
#[derive(Debug, Clone)]
pub struct GeneratedCert {
    /// PEM-encoded certificate
    pub cert_pem: String,
    /// PEM-encoded PKCS8 private key
    pub key_pem: String,
}

impl GeneratedCert {
    /// Write `cert.pem` and `key.pem` into `dir`, overwriting existing files.
    ///
    /// Returns the paths written. The key file is restricted to owner
    /// read/write on Unix.
    pub fn write_to(&self, dir: &Path) -> std::result::Result<(PathBuf, PathBuf), CertError> {
        let cert_path = dir.join(CERT_FILE);
        let key_path = dir.join(KEY_FILE);

        fs::write(&cert_path, &self.cert_pem).map_err(|source| CertError::WriteFile {
            path: cert_path.clone(),
            source,
        })?;
        fs::write(&key_path, &self.key_pem).map_err(|source| CertError::WriteFile {
            path: key_path.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&key_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&key_path, perms)?;
        }

        Ok((cert_path, key_path))
    }
}

/// Create certificate parameters for the given address.
fn create_params(ip: Ipv4Addr) -> std::result::Result<CertificateParams, CertError> {
    let mut params = CertificateParams::default();

    params.distinguished_name.push(DnType::CountryName, "US");
    params
        .distinguished_name
        .push(DnType::StateOrProvinceName, "State");
    params.distinguished_name.push(DnType::LocalityName, "City");
    params
        .distinguished_name
        .push(DnType::OrganizationName, "Development");
    params
        .distinguished_name
        .push(DnType::CommonName, ip.to_string());

    // Clients dial by hostname or by raw address, so the loopback and LAN
    // addresses appear both as DNS names and as IP entries.
    params.subject_alt_names = vec![
        SanType::DnsName("localhost".try_into()?),
        SanType::DnsName("127.0.0.1".try_into()?),
        SanType::DnsName(ip.to_string().try_into()?),
        SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        SanType::IpAddress(IpAddr::V4(ip)),
    ];

    params.not_before = time::OffsetDateTime::now_utc();
    params.not_after = params.not_before + time::Duration::days(VALIDITY_DAYS);

    Ok(params)
}

/// Generate a self-signed certificate and its RSA key pair.
///
/// The serial number is freshly randomized on every call, so re-running the
/// generator never reuses key or certificate material.
pub fn generate_self_signed(
    options: &CertOptions,
) -> std::result::Result<GeneratedCert, CertError> {
    let params = create_params(options.ip)?;

    let key_pair = KeyPair::generate_rsa_for(&rcgen::PKCS_RSA_SHA256, RsaKeySize::_2048)?;
    let cert = params.self_signed(&key_pair)?;

    debug!(ip = %options.ip, "Generated self-signed certificate");

    Ok(GeneratedCert {
        cert_pem: cert.pem(),
        key_pem: key_pair.serialize_pem(),
    })
}
