//! Certificate generator tests.
//!
//! Parses the generated PEM back with x509-parser and checks the contract:
//! one-year validity, the full SAN set, RSA-2048 key material, and fresh
//! serials across runs.

use std::net::Ipv4Addr;

use tempfile::TempDir;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

use orrery::{generate_self_signed, CertOptions, GeneratedCert, CERT_FILE, KEY_FILE};

fn generate_default() -> GeneratedCert {
    generate_self_signed(&CertOptions::default()).unwrap()
}

/// Parse the PEM certificate and run `check` against it.
fn with_parsed_cert<F: FnOnce(&X509Certificate)>(certs: &GeneratedCert, check: F) {
    let (_, pem) = x509_parser::pem::parse_x509_pem(certs.cert_pem.as_bytes()).unwrap();
    let cert = pem.parse_x509().unwrap();
    check(&cert);
}

#[test]
fn test_validity_window_is_365_days() {
    let certs = generate_default();
    with_parsed_cert(&certs, |cert| {
        let validity = cert.validity();
        let window = validity.not_after.timestamp() - validity.not_before.timestamp();
        assert_eq!(window, 365 * 24 * 60 * 60);
    });
}

#[test]
fn test_subject_alternative_names() {
    let ip = Ipv4Addr::new(10, 0, 0, 7);
    let certs = generate_self_signed(&CertOptions { ip }).unwrap();
    with_parsed_cert(&certs, |cert| {
        let san = cert.subject_alternative_name().unwrap().unwrap();
        let names = &san.value.general_names;

        assert!(names.contains(&GeneralName::DNSName("localhost")));
        assert!(names.contains(&GeneralName::DNSName("127.0.0.1")));
        assert!(names.contains(&GeneralName::DNSName("10.0.0.7")));
        assert!(names.contains(&GeneralName::IPAddress(&[127, 0, 0, 1])));
        assert!(names.contains(&GeneralName::IPAddress(&[10, 0, 0, 7])));
    });
}

#[test]
fn test_self_signed_identity() {
    let certs = generate_default();
    with_parsed_cert(&certs, |cert| {
        // Self-signed: issuer equals subject
        assert_eq!(cert.subject().to_string(), cert.issuer().to_string());

        let subject = cert.subject().to_string();
        assert!(subject.contains("C=US"));
        assert!(subject.contains("ST=State"));
        assert!(subject.contains("L=City"));
        assert!(subject.contains("O=Development"));
        assert!(subject.contains("CN=192.168.1.2"));
    });
}

#[test]
fn test_rsa_2048_key() {
    let certs = generate_default();
    with_parsed_cert(&certs, |cert| {
        let parsed = cert.public_key().parsed().unwrap();
        match parsed {
            PublicKey::RSA(rsa) => {
                // Strip the leading zero the DER integer encoding may carry
                let modulus = match rsa.modulus {
                    [0, rest @ ..] => rest,
                    m => m,
                };
                assert_eq!(modulus.len() * 8, 2048);
                assert_eq!(rsa.exponent, &[0x01, 0x00, 0x01]);
            }
            other => panic!("expected an RSA public key, got {other:?}"),
        }
    });
}

#[test]
fn test_signature_verifies_against_own_key() {
    let certs = generate_default();
    with_parsed_cert(&certs, |cert| {
        assert!(cert.verify_signature(None).is_ok());
    });
}

#[test]
fn test_regeneration_produces_fresh_serial() {
    let first = generate_default();
    let second = generate_default();

    let (_, first_pem) = x509_parser::pem::parse_x509_pem(first.cert_pem.as_bytes()).unwrap();
    let (_, second_pem) = x509_parser::pem::parse_x509_pem(second.cert_pem.as_bytes()).unwrap();
    let first_cert = first_pem.parse_x509().unwrap();
    let second_cert = second_pem.parse_x509().unwrap();

    assert_ne!(first_cert.raw_serial(), second_cert.raw_serial());
    assert_ne!(first.key_pem, second.key_pem);
}

#[test]
fn test_write_to_overwrites_previous_pair() {
    let dir = TempDir::new().unwrap();

    let first = generate_default();
    first.write_to(dir.path()).unwrap();
    let second = generate_default();
    second.write_to(dir.path()).unwrap();

    let cert_on_disk = std::fs::read_to_string(dir.path().join(CERT_FILE)).unwrap();
    let key_on_disk = std::fs::read_to_string(dir.path().join(KEY_FILE)).unwrap();
    assert_eq!(cert_on_disk, second.cert_pem);
    assert_eq!(key_on_disk, second.key_pem);
    assert_ne!(cert_on_disk, first.cert_pem);
}
