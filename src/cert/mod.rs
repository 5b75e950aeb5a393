pub mod extensions;
pub mod params;

use der::{Any, Encode, EncodePem};
use x509_cert::certificate::CertificateInner;

use crate::error::{CaKitError, Result};
use crate::key::KeyPair;
use crate::options::HashAlgorithm;

/// Represents the supported signature algorithms for certificates.
///
/// Keys are always RSA, so the variants differ only in the digest; each maps
/// to the corresponding `sha*WithRSAEncryption` OID.
#[derive(Debug, Clone)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption.
    Sha256WithRSA,
    /// SHA-384 with RSA encryption.
    Sha384WithRSA,
    /// SHA-512 with RSA encryption.
    Sha512WithRSA,
}

impl SignatureAlgorithm {
    pub fn from_hash(hash: HashAlgorithm) -> Self {
        match hash {
            HashAlgorithm::Sha256 => SignatureAlgorithm::Sha256WithRSA,
            HashAlgorithm::Sha384 => SignatureAlgorithm::Sha384WithRSA,
            HashAlgorithm::Sha512 => SignatureAlgorithm::Sha512WithRSA,
        }
    }
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    /// Converts a `SignatureAlgorithm` into an `AlgorithmIdentifierOwned`.
    ///
    /// RSA signature algorithm identifiers carry an explicit NULL parameter
    /// (RFC 4055).
    fn from(value: SignatureAlgorithm) -> Self {
        let oid = match value {
            SignatureAlgorithm::Sha256WithRSA => const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha384WithRSA => const_oid::db::rfc5912::SHA_384_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha512WithRSA => const_oid::db::rfc5912::SHA_512_WITH_RSA_ENCRYPTION,
        };
        x509_cert::spki::AlgorithmIdentifierOwned {
            oid,
            parameters: Some(Any::null()),
        }
    }
}

/// Represents an X.509 certificate.
///
/// This struct provides methods to encode the certificate into DER or PEM
/// formats.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }
}

/// A certificate together with the private key that matches its subject
/// public key. Ownership of both transfers to the caller at the end of a
/// successful issuance.
#[derive(Debug, Clone)]
pub struct CertificateWithPrivateKey {
    pub cert: Certificate,
    pub key: KeyPair,
}
