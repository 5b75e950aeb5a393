use der::Encode;
use der::asn1::BitString;
use x509_cert::certificate::CertificateInner;

use crate::cert::params::{DistinguishedName, Validity};
use crate::cert::{Certificate, SignatureAlgorithm};
use crate::csr::CertificateRequest;
use crate::error::{CaKitError, Result};
use crate::key::KeyPair;
use crate::options::HashAlgorithm;
use crate::serial::SerialNumber;
use crate::tbs_certificate::TbsCertificate;

/// Represents an entity capable of signing certificate requests.
///
/// This trait provides the issuer's identity and signing material; the
/// provided [`Issuer::sign_request`] turns a finalized request into a
/// certificate.
pub trait Issuer {
    /// Returns the distinguished name of the issuer.
    fn issuer_name(&self) -> DistinguishedName;

    /// Returns the signing key of the issuer.
    fn signing_key(&self) -> &KeyPair;

    /// Returns the hash algorithm used for the certificate signature.
    fn hash_algorithm(&self) -> HashAlgorithm;

    /// Signs a finalized certificate request.
    ///
    /// The request's subject, public key and extension set are carried into
    /// the certificate unchanged, in the extension order the request
    /// accumulated them.
    fn sign_request(
        &self,
        request: &CertificateRequest,
        serial: &SerialNumber,
        validity: Validity,
    ) -> Result<Certificate> {
        let signature_algo = SignatureAlgorithm::from_hash(self.hash_algorithm());

        let tbs_cert = TbsCertificate {
            serial_number: serial.as_bytes().to_vec(),
            signature_algorithm: signature_algo.clone(),
            issuer: self.issuer_name(),
            validity,
            subject: request.cert_info().subject.clone(),
            subject_public_key: request.public_key().clone(),
            extensions: request.cert_info().extensions().to_vec(),
        };

        let tbs_inner = tbs_cert.to_tbs_certificate_inner()?;
        let tbs_der = tbs_inner
            .to_der()
            .map_err(|e| CaKitError::SigningError(e.to_string()))?;
        let signature = self.signing_key().sign(self.hash_algorithm(), &tbs_der)?;

        let inner = CertificateInner {
            tbs_certificate: tbs_inner,
            signature_algorithm: signature_algo.into(),
            signature: BitString::from_bytes(&signature)
                .map_err(|e| CaKitError::SigningError(e.to_string()))?,
        };

        Ok(Certificate { inner })
    }
}

/// Issuer for self-signed certificates: issuer == subject, and the signing
/// key is the request's own key.
pub struct SelfIssuer<'a> {
    pub name: DistinguishedName,
    pub key: &'a KeyPair,
    pub hash: HashAlgorithm,
}

impl Issuer for SelfIssuer<'_> {
    fn issuer_name(&self) -> DistinguishedName {
        self.name.clone()
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }
}
