use der::asn1::{GeneralizedTime, UtcTime};
use time::OffsetDateTime;
use x509_cert::Version;
use x509_cert::certificate::TbsCertificateInner;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Time;

use crate::cert::SignatureAlgorithm;
use crate::cert::params::{DistinguishedName, ExtensionParam, Validity};
use crate::error::{CaKitError, Result};

/// The "To Be Signed" (TBS) portion of an X.509 certificate.
///
/// # Fields
/// * `serial_number` - The unique identifier for the certificate.
/// * `signature_algorithm` - The algorithm the certificate will be signed with.
/// * `issuer` - The distinguished name of the certificate issuer.
/// * `validity` - The certificate's validity period.
/// * `subject` - The distinguished name of the certificate subject.
/// * `subject_public_key` - The subject's public key, already in SPKI form.
/// * `extensions` - X.509v3 extensions, in insertion order.
pub struct TbsCertificate {
    pub serial_number: Vec<u8>,
    pub signature_algorithm: SignatureAlgorithm,
    pub issuer: DistinguishedName,
    pub validity: Validity,
    pub subject: DistinguishedName,
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    pub extensions: Vec<ExtensionParam>,
}

impl TbsCertificate {
    /// Converts into a `TbsCertificateInner` ready for DER encoding.
    pub fn to_tbs_certificate_inner(&self) -> Result<TbsCertificateInner> {
        let algorithm_id: x509_cert::spki::AlgorithmIdentifierOwned =
            self.signature_algorithm.clone().into();

        let extensions = self
            .extensions
            .iter()
            .map(|ext| ext.to_x509())
            .collect::<Result<Vec<_>>>()?;

        let validity = x509_cert::time::Validity {
            not_before: to_x509_time(self.validity.not_before)?,
            not_after: to_x509_time(self.validity.not_after)?,
        };

        let serial_number = x509_cert::serial_number::SerialNumber::new(&self.serial_number)
            .map_err(|e| CaKitError::EncodingError(e.to_string()))?;

        Ok(TbsCertificateInner {
            version: Version::V3,
            serial_number,
            signature: algorithm_id,
            issuer: self.issuer.as_x509_name()?,
            validity,
            subject: self.subject.as_x509_name()?,
            subject_public_key_info: self.subject_public_key.clone(),
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: Some(extensions),
        })
    }
}

/// Dates before 2050 are encoded as UTCTime, later ones as GeneralizedTime
/// (RFC 5280 4.1.2.5).
fn to_x509_time(timestamp: OffsetDateTime) -> Result<Time> {
    let system_time: std::time::SystemTime = timestamp.into();
    if timestamp.year() < 2050 {
        Ok(Time::UtcTime(
            UtcTime::from_system_time(system_time)
                .map_err(|e| CaKitError::EncodingError(e.to_string()))?,
        ))
    } else {
        let date_time = der::DateTime::from_system_time(system_time)
            .map_err(|e| CaKitError::EncodingError(e.to_string()))?;
        Ok(Time::GeneralTime(GeneralizedTime::from_date_time(date_time)))
    }
}
