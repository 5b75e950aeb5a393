mod util;

use std::collections::HashSet;

use cakit::authority::create_private_ca;
use cakit::cert::extensions::{
    BasicConstraints, KeyUsage, KeyUsages, NameConstraints, SubjectKeyIdentifier,
    ToAndFromX509Extension,
};
use cakit::cert::params::DistinguishedName;
use cakit::options::{HashAlgorithm, Options};
use der::{Decode, Encode};
use regex::Regex;
use rsa::traits::PublicKeyParts;

fn ca_common_name() -> String {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    DistinguishedName::from_x509_name(&tbs.subject).common_name
}

#[test]
fn test_issuer_equals_subject() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    assert_eq!(tbs.issuer, tbs.subject);
}

#[test]
fn test_common_name_derivation() {
    let cn = ca_common_name();
    let pattern = Regex::new(r"^ca-\d+\.example\.com$").unwrap();
    assert!(pattern.is_match(&cn), "unexpected common name: {cn}");
}

#[test]
fn test_common_name_embeds_certificate_serial() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    let serial_bytes = tbs.serial_number.as_bytes();
    assert!(serial_bytes.len() <= 8, "serial wider than 64 bits");

    let mut buf = [0u8; 8];
    buf[8 - serial_bytes.len()..].copy_from_slice(serial_bytes);
    let serial = u64::from_be_bytes(buf);
    assert_eq!(ca_common_name(), format!("ca-{serial}.example.com"));
}

#[test]
fn test_extension_completeness() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    let extensions = tbs.extensions.as_ref().unwrap();

    assert_eq!(extensions.len(), 4);
    assert_eq!(extensions[0].extn_id, KeyUsage::OID);
    assert!(extensions[0].critical);
    assert_eq!(extensions[1].extn_id, BasicConstraints::OID);
    assert!(!extensions[1].critical);
    assert_eq!(extensions[2].extn_id, NameConstraints::OID);
    assert!(!extensions[2].critical);
    assert_eq!(extensions[3].extn_id, SubjectKeyIdentifier::OID);
    assert!(!extensions[3].critical);

    let key_usage =
        KeyUsage::from_x509_extension_value(extensions[0].extn_value.as_bytes()).unwrap();
    assert_eq!(
        key_usage.0,
        KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment | KeyUsages::KeyCertSign
    );

    let basic_constraints =
        BasicConstraints::from_x509_extension_value(extensions[1].extn_value.as_bytes()).unwrap();
    assert!(basic_constraints.is_ca);
    assert!(basic_constraints.max_path_length.is_none());
}

#[test]
fn test_name_constraints_cover_hostname_sans_and_cn() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    let extensions = tbs.extensions.as_ref().unwrap();

    let name_constraints =
        NameConstraints::from_x509_extension_value(extensions[2].extn_value.as_bytes()).unwrap();
    let permitted: HashSet<String> = name_constraints.permitted_dns_names.into_iter().collect();

    let expected: HashSet<String> = [
        "example.com".to_string(),
        "alt1.example.com".to_string(),
        "alt2.example.com".to_string(),
        ca_common_name(),
    ]
    .into_iter()
    .collect();
    assert_eq!(permitted, expected);
}

#[test]
fn test_subject_key_identifier_is_public_key_hash() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;
    let extensions = tbs.extensions.as_ref().unwrap();

    let skid =
        SubjectKeyIdentifier::from_x509_extension_value(extensions[3].extn_value.as_bytes())
            .unwrap();
    assert_eq!(skid.key_id.len(), 20);
    assert_eq!(
        skid,
        SubjectKeyIdentifier::from_spki(&tbs.subject_public_key_info)
    );
}

#[test]
fn test_self_signature_verifies_with_returned_key() {
    let test_ca = util::test_ca();
    let cert = &test_ca.ca.cert.inner;

    assert_eq!(
        cert.signature_algorithm.oid,
        const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION
    );
    assert_eq!(cert.signature_algorithm, cert.tbs_certificate.signature);

    let tbs_der = cert.tbs_certificate.to_der().unwrap();
    test_ca
        .ca
        .key
        .public_key()
        .verify(
            HashAlgorithm::Sha256,
            &tbs_der,
            cert.signature.raw_bytes(),
        )
        .unwrap();
}

#[test]
fn test_key_is_rsa_4096_with_f4_exponent() {
    let public = util::test_ca().ca.key.public_key();
    assert_eq!(public.as_rsa().n().bits(), 4096);
    assert_eq!(public.as_rsa().e(), &rsa::BigUint::from(65537u64));
}

#[test]
fn test_validity_matches_requested_lifetime() {
    let tbs = &util::test_ca().ca.cert.inner.tbs_certificate;

    let to_system_time = |t: &x509_cert::time::Time| match t {
        x509_cert::time::Time::UtcTime(ut) => ut.to_system_time(),
        x509_cert::time::Time::GeneralTime(gt) => gt.to_system_time(),
    };
    let not_before = to_system_time(&tbs.validity.not_before);
    let not_after = to_system_time(&tbs.validity.not_after);
    let lifetime = not_after.duration_since(not_before).unwrap();
    assert_eq!(lifetime.as_secs(), 398 * 24 * 60 * 60);
}

#[test]
fn test_debug_csr_sink_receives_request_body_once() {
    let test_ca = util::test_ca();
    assert_eq!(test_ca.csr_dumps.len(), 1);

    let der = cakit::pem_utils::pem_to_der(&test_ca.csr_dumps[0]).unwrap();
    let info = x509_cert::request::CertReqInfo::from_der(&der).unwrap();
    let cn = DistinguishedName::from_x509_name(&info.subject).common_name;
    assert_eq!(cn, ca_common_name());
}

#[test]
fn test_rejected_extension_value_aborts_creation() {
    // Non-IA5 characters cannot appear in a DNS name constraint; the
    // operation must fail before any key exists.
    let options = Options::builder()
        .hostname("example.com".to_string())
        .subject_alt_names(vec!["exämple.com".to_string()])
        .build();
    assert!(create_private_ca(&options).is_err());
}
