use log::{debug, info};

use crate::cert::CertificateWithPrivateKey;
use crate::cert::extensions::{
    BasicConstraints, KeyUsage, KeyUsages, NameConstraints, SubjectKeyIdentifier,
};
use crate::cert::params::{CertInfo, DistinguishedName, ExtensionParam, Validity};
use crate::csr::RequestBuilder;
use crate::error::Result;
use crate::issuer::{Issuer, SelfIssuer};
use crate::key::KeyPair;
use crate::options::{Options, Verbosity};
use crate::serial::SerialNumber;

/// Modulus size for CA keys. Fixed regardless of any caller-configurable
/// sizing for leaf keys.
pub const CA_KEY_BITS: usize = 4096;

/// Public exponent for CA keys (RSA F4).
pub const CA_KEY_EXPONENT: u64 = 65537;

/// Issues a self-signed private CA certificate.
///
/// The CA's subject is derived from `options`, its Common Name is
/// `ca-<serial>.<hostname>`, and its signing authority is constrained to the
/// hostname, the subject alternative names and the derived Common Name. The
/// certificate and its freshly generated 4096-bit RSA key are returned with
/// full ownership; nothing is written to disk.
///
/// The operation is all-or-nothing: a failure at any step aborts and returns
/// the error, with no partial output.
pub fn create_private_ca(options: &Options) -> Result<CertificateWithPrivateKey> {
    create_private_ca_with_csr_sink(options, None)
}

/// Like [`create_private_ca`], with a diagnostic sink for the in-progress
/// CSR.
///
/// At `Verbosity::Debug` the sink, if present, receives the PEM-rendered
/// request body once, after key generation and before the
/// SubjectKeyIdentifier is attached. Purely observational; writing it
/// anywhere is the caller's choice.
pub fn create_private_ca_with_csr_sink(
    options: &Options,
    csr_sink: Option<&mut dyn FnMut(&str)>,
) -> Result<CertificateWithPrivateKey> {
    let serial = SerialNumber::generate()?;
    build_ca(options, serial, csr_sink)
}

fn build_ca(
    options: &Options,
    serial: SerialNumber,
    mut csr_sink: Option<&mut dyn FnMut(&str)>,
) -> Result<CertificateWithPrivateKey> {
    let mut cert_info = ca_cert_info(options, &serial);
    plan_ca_extensions(options, &mut cert_info)?;

    if options.verbosity >= Verbosity::Verbose {
        info!("Generating RSA key for private CA");
    }
    let key = KeyPair::generate_rsa(CA_KEY_BITS, CA_KEY_EXPONENT)?;

    if options.verbosity >= Verbosity::Verbose {
        info!("Generating CSR for private CA");
    }
    let mut builder = RequestBuilder::new(cert_info, &key)?;

    if options.verbosity >= Verbosity::Debug {
        if let Some(sink) = csr_sink.as_mut() {
            sink(&builder.to_pem()?);
        }
    }

    if options.verbosity >= Verbosity::Debug {
        debug!("Creating SubjectKeyIdentifier");
    }
    let skid = SubjectKeyIdentifier::from_spki(builder.public_key());
    builder.push_extension(ExtensionParam::from_extension(skid, false)?);

    let csr = builder.finalize(&key)?;

    if options.verbosity >= Verbosity::Verbose {
        info!("Signing CSR for private CA");
    }
    let issuer = SelfIssuer {
        name: csr.cert_info().subject.clone(),
        key: &key,
        hash: options.hash_fn,
    };
    let cert = issuer.sign_request(&csr, &serial, Validity::for_days(options.lifetime_days))?;

    Ok(CertificateWithPrivateKey { cert, key })
}

/// Builds the CA's subject from the options, with a Common Name of the form
/// `ca-<serial>.<hostname>` so repeated runs never collide.
fn ca_cert_info(options: &Options, serial: &SerialNumber) -> CertInfo {
    let subject = DistinguishedName {
        common_name: format!("ca-{}.{}", serial.low_word(), options.hostname),
        country: options.country.clone(),
        state: options.state.clone(),
        locality: options.locality.clone(),
        organization: options.org.clone(),
        organization_unit: options.org_unit.clone(),
    };
    CertInfo::new(subject, options.hash_fn)
}

/// Appends the CA's extension set, in order:
///
/// 1. Key Usage (critical): the CA may sign certificates and establish key
///    agreement, nothing else.
/// 2. Basic Constraints: CA:TRUE.
/// 3. Name Constraints: permitted DNS entries for the hostname, every
///    subject alternative name in input order, and the CA's own Common Name
///    (without which the self-signature fails strict path validation).
///
/// The SubjectKeyIdentifier is not planned here: it needs the generated
/// public key and is attached through the request builder.
fn plan_ca_extensions(options: &Options, cert_info: &mut CertInfo) -> Result<()> {
    let key_usage = KeyUsage(
        KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment | KeyUsages::KeyCertSign,
    );
    cert_info.push_extension(ExtensionParam::from_extension(key_usage, true)?);

    let basic_constraints = BasicConstraints {
        is_ca: true,
        max_path_length: None,
    };
    cert_info.push_extension(ExtensionParam::from_extension(basic_constraints, false)?);

    let mut permitted = Vec::with_capacity(options.subject_alt_names.len() + 2);
    permitted.push(options.hostname.clone());
    permitted.extend(options.subject_alt_names.iter().cloned());
    permitted.push(cert_info.subject.common_name.clone());
    let name_constraints = NameConstraints::permitted_dns(permitted);
    cert_info.push_extension(ExtensionParam::from_extension(name_constraints, false)?);

    Ok(())
}
