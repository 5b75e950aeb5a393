use bon::Builder;
use const_oid::ObjectIdentifier;
use der::asn1::OctetString;
use time::Duration;
use time::OffsetDateTime;
use x509_cert::name::RdnSequence;

use super::extensions::ToAndFromX509Extension;
use crate::error::{CaKitError, Result};
use crate::options::HashAlgorithm;

/// Mutable build record for the certificate about to be issued.
///
/// Created empty, populated by the identity builder and the extension
/// planner, then consumed read-only by CSR finalization. The extension list
/// is append-only; every entry was validated when it was constructed, so the
/// record is never left holding a half-built extension.
#[derive(Clone, Debug)]
pub struct CertInfo {
    pub subject: DistinguishedName,
    pub hash: HashAlgorithm,
    extensions: Vec<ExtensionParam>,
}

impl CertInfo {
    pub fn new(subject: DistinguishedName, hash: HashAlgorithm) -> Self {
        Self {
            subject,
            hash,
            extensions: Vec::new(),
        }
    }

    /// Appends a validated extension. Insertion order is preserved into the
    /// final certificate.
    pub fn push_extension(&mut self, extension: ExtensionParam) {
        self.extensions.push(extension);
    }

    pub fn extensions(&self) -> &[ExtensionParam] {
        &self.extensions
    }
}

/// Distinguished name for the certificate subject or issuer.
///
/// # Fields
/// * `common_name` - The common name (CN).
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `organization` - The organization (O).
/// * `organization_unit` - The organizational unit (OU).
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// Converts the distinguished name to an X.509 RDN sequence. Components
    /// that are unset or empty are left out of the encoded name.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName> {
        use core::str::FromStr;

        let mut components = vec![format!("CN={}", self.common_name)];
        for (ty, value) in [
            ("OU", &self.organization_unit),
            ("O", &self.organization),
            ("L", &self.locality),
            ("ST", &self.state),
            ("C", &self.country),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    components.push(format!("{ty}={value}"));
                }
            }
        }
        RdnSequence::from_str(&components.join(","))
            .map_err(|e| CaKitError::InvalidInput(e.to_string()))
    }

    /// Extracts the common name from an X.509 RDN sequence.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Self {
        let mut common_name = String::new();

        for rdn in x509dn.0.iter() {
            for attr in rdn.0.iter() {
                if attr.oid.to_string() == "2.5.4.3" {
                    if let Ok(s) = attr.value.decode_as::<String>() {
                        common_name = s;
                    } else if let Ok(s) = attr.value.decode_as::<der::asn1::PrintableString>() {
                        common_name = s.to_string();
                    }
                }
            }
        }

        DistinguishedName {
            common_name,
            ..Default::default()
        }
    }
}

/// Certificate validity period.
#[derive(Clone, Debug)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now for the given number of days.
    pub fn for_days(days: i64) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            not_before: now,
            not_after: now + Duration::days(days),
        }
    }
}

/// A constructed X.509 extension: OID, criticality and pre-encoded value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Encodes a typed extension into an `ExtensionParam`.
    ///
    /// A value the encoder rejects fails the whole construction; there is no
    /// fallback to an empty extension body.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: E, critical: bool) -> Result<Self> {
        let value = extension
            .to_x509_extension_value()
            .map_err(|e| CaKitError::ExtensionError(e.to_string()))?;
        Ok(Self {
            oid: E::OID,
            critical,
            value,
        })
    }

    /// Decodes this `ExtensionParam` into a typed extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }

    /// Converts into the `x509_cert` extension structure.
    pub fn to_x509(&self) -> Result<x509_cert::ext::Extension> {
        Ok(x509_cert::ext::Extension {
            extn_id: self.oid,
            critical: self.critical,
            extn_value: OctetString::new(self.value.clone())
                .map_err(|e| CaKitError::EncodingError(e.to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_components_are_omitted() {
        let dn = DistinguishedName::builder()
            .common_name("ca.example.com".to_string())
            .organization("Example Corp".to_string())
            .country(String::new())
            .build();
        let name = dn.as_x509_name().unwrap();
        let rendered = name.to_string();
        assert!(rendered.contains("CN=ca.example.com"));
        assert!(rendered.contains("O=Example Corp"));
        assert!(!rendered.contains("C="));
    }

    #[test]
    fn test_common_name_extraction() {
        let dn = DistinguishedName::builder()
            .common_name("ca-1234.example.com".to_string())
            .organization("Example Corp".to_string())
            .build();
        let roundtrip = DistinguishedName::from_x509_name(&dn.as_x509_name().unwrap());
        assert_eq!(roundtrip.common_name, "ca-1234.example.com");
    }
}
