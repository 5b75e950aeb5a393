mod util;

use std::fs;
use std::process::Command;

use regex::Regex;

#[test]
fn test_openssl_cli_displays_ca_fields() {
    let ca = &util::test_ca().ca;
    let cert_pem = ca.cert.to_pem().unwrap();

    let cert_path = "/tmp/cakit_test_ca_cert.pem";
    fs::write(cert_path, &cert_pem).expect("Failed to write CA certificate");

    let output = Command::new("openssl")
        .arg("x509")
        .arg("-in")
        .arg(cert_path)
        .arg("-noout")
        .arg("-text")
        .output()
        .expect("Failed to execute OpenSSL command");

    assert!(
        output.status.success(),
        "OpenSSL command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output_text = String::from_utf8_lossy(&output.stdout);

    assert!(
        output_text.contains("Version: 3 (0x2)"),
        "Version field is incorrect"
    );
    assert!(
        output_text.contains("Signature Algorithm: sha256WithRSAEncryption"),
        "Signature Algorithm field is incorrect"
    );
    assert!(
        output_text.contains("(4096 bit)"),
        "Key size is incorrect"
    );
    assert!(output_text.contains("CA:TRUE"), "Missing CA flag");
    assert!(
        output_text.contains("Digital Signature")
            && output_text.contains("Key Encipherment")
            && output_text.contains("Certificate Sign"),
        "Key usage is incorrect"
    );
    assert!(
        output_text.contains("DNS:example.com")
            && output_text.contains("DNS:alt1.example.com")
            && output_text.contains("DNS:alt2.example.com"),
        "Missing permitted name constraint entries"
    );

    let cn_pattern = Regex::new(r"CN ?= ?ca-\d+\.example\.com").unwrap();
    assert!(
        cn_pattern.is_match(&output_text),
        "Missing or incorrect derived common name"
    );

    fs::remove_file(cert_path).expect("Failed to remove test certificate");
}

#[test]
fn test_openssl_crate_validates_self_signature() {
    let ca = &util::test_ca().ca;
    let cert_der = ca.cert.to_der().unwrap();

    use openssl::x509::X509;
    let x509 = X509::from_der(&cert_der).expect("Failed to parse DER");

    // Self-signed: the certificate verifies against its own public key.
    let public_key = x509.public_key().unwrap();
    assert!(x509.verify(&public_key).unwrap(), "Signature mismatch");

    let subject = x509
        .subject_name()
        .entries_by_nid(openssl::nid::Nid::COMMONNAME)
        .next()
        .unwrap()
        .data()
        .as_utf8()
        .unwrap()
        .to_string();
    let issuer = x509
        .issuer_name()
        .entries_by_nid(openssl::nid::Nid::COMMONNAME)
        .next()
        .unwrap()
        .data()
        .as_utf8()
        .unwrap()
        .to_string();
    assert_eq!(subject, issuer, "Issuer CN differs from subject CN");
    assert!(subject.starts_with("ca-"), "Subject CN mismatch");

    assert_eq!(x509.version(), 2, "X509 version should be 3 (0-based index)");
}
