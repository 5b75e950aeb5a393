use der::asn1::BitString;
use der::{Encode, EncodePem};
use x509_cert::attr::{Attribute, Attributes};
use x509_cert::request::{CertReq, CertReqInfo, ExtensionReq, Version};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::SignatureAlgorithm;
use crate::cert::params::{CertInfo, ExtensionParam};
use crate::error::{CaKitError, Result};
use crate::key::KeyPair;
use crate::pem_utils::der_to_pem;

/// Accumulates a certificate signing request before it is locked in.
///
/// The builder binds the [`CertInfo`] to the generated public key and stays
/// open for late extensions (the SubjectKeyIdentifier can only be derived
/// once the public key exists). [`RequestBuilder::finalize`] is the single
/// exit: it attaches the accumulated extensions as a pkcs-9 extensionRequest
/// attribute, signs the request body, and hands back an immutable
/// [`CertificateRequest`].
pub struct RequestBuilder {
    cert_info: CertInfo,
    public_key: SubjectPublicKeyInfoOwned,
}

impl RequestBuilder {
    /// Binds the certificate info to the key pair's public half.
    pub fn new(cert_info: CertInfo, key: &KeyPair) -> Result<Self> {
        let public_key = key
            .to_spki()
            .map_err(|e| CaKitError::RequestError(e.to_string()))?;
        Ok(Self {
            cert_info,
            public_key,
        })
    }

    /// The public key this request is for, in SPKI form.
    pub fn public_key(&self) -> &SubjectPublicKeyInfoOwned {
        &self.public_key
    }

    /// Appends a late extension to the underlying certificate info.
    pub fn push_extension(&mut self, extension: ExtensionParam) {
        self.cert_info.push_extension(extension);
    }

    /// DER-encodes the request body as it currently stands, without the
    /// extension attribute or signature. Diagnostic use only.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let info = self.request_info(Attributes::default())?;
        info.to_der()
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }

    /// PEM rendering of [`RequestBuilder::to_der`], for debug dumps.
    pub fn to_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.to_der()?, "CERTIFICATE REQUEST"))
    }

    /// Locks in the accumulated extensions and signs the request with the
    /// subject's own key (proof of possession).
    pub fn finalize(self, key: &KeyPair) -> Result<CertificateRequest> {
        let extensions = self
            .cert_info
            .extensions()
            .iter()
            .map(|ext| ext.to_x509())
            .collect::<Result<Vec<_>>>()?;

        let attribute = Attribute::try_from(ExtensionReq(extensions))
            .map_err(|e| CaKitError::RequestError(e.to_string()))?;
        let mut attributes = Attributes::default();
        attributes
            .insert(attribute)
            .map_err(|e| CaKitError::RequestError(e.to_string()))?;

        let info = self.request_info(attributes)?;
        let info_der = info
            .to_der()
            .map_err(|e| CaKitError::RequestError(e.to_string()))?;
        let signature = key.sign(self.cert_info.hash, &info_der)?;

        let inner = CertReq {
            info,
            algorithm: SignatureAlgorithm::from_hash(self.cert_info.hash).into(),
            signature: BitString::from_bytes(&signature)
                .map_err(|e| CaKitError::RequestError(e.to_string()))?,
        };

        Ok(CertificateRequest {
            cert_info: self.cert_info,
            public_key: self.public_key,
            inner,
        })
    }

    fn request_info(&self, attributes: Attributes) -> Result<CertReqInfo> {
        Ok(CertReqInfo {
            version: Version::V1,
            subject: self.cert_info.subject.as_x509_name()?,
            public_key: self.public_key.clone(),
            attributes,
        })
    }
}

/// A finalized, signed certificate signing request. Immutable; consumed
/// read-only by the signer.
pub struct CertificateRequest {
    cert_info: CertInfo,
    public_key: SubjectPublicKeyInfoOwned,
    inner: CertReq,
}

impl CertificateRequest {
    pub fn cert_info(&self) -> &CertInfo {
        &self.cert_info
    }

    pub fn public_key(&self) -> &SubjectPublicKeyInfoOwned {
        &self.public_key
    }

    /// Encodes the request into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }

    /// Encodes the request into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }
}
