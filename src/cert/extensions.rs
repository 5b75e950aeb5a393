use const_oid::AssociatedOid;
use der::{
    Decode, Encode,
    asn1::{Ia5String, OctetString},
    oid::ObjectIdentifier,
};
use sha1::Sha1;
use x509_cert::ext::pkix::constraints::name::GeneralSubtree;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{CaKitError, Result};

/// Trait for converting to and from X.509 extension values.
///
/// Encoding is validating: a value the encoder rejects surfaces as an error
/// at construction time, never as a silently empty extension body.
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Default)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u32>,
}

impl ToAndFromX509Extension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length.map(|v| v as u8),
        };

        Ok(bc.to_der()?)
    }

    fn from_x509_extension_value(der_bytes: &[u8]) -> Result<Self> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(der_bytes)?;
        Ok(Self {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint.map(|v| v as u32),
        })
    }
}

pub use der::flagset::FlagSet;
use x509_cert::ext::pkix::KeyUsage as X509KeyUsage;
pub use x509_cert::ext::pkix::KeyUsages;

/// Represents the Key Usage extension.
///
/// This extension defines the purpose of the key contained in the certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl ToAndFromX509Extension for KeyUsage {
    const OID: ObjectIdentifier = <X509KeyUsage as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>> {
        let ku = X509KeyUsage::from(self.0);
        Ok(ku.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let ku = X509KeyUsage::from_der(extension)?;
        Ok(Self(ku.0))
    }
}

/// Represents the Name Constraints extension, restricted to permitted DNS
/// subtrees.
///
/// A CA carrying this extension may only sign certificates whose DNS names
/// fall under one of the permitted entries. Only "permitted" DNS constraints
/// are modelled; excluded subtrees and other general-name forms are not used
/// by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConstraints {
    pub permitted_dns_names: Vec<String>,
}

impl NameConstraints {
    pub fn permitted_dns(names: Vec<String>) -> Self {
        Self {
            permitted_dns_names: names,
        }
    }
}

impl ToAndFromX509Extension for NameConstraints {
    const OID: ObjectIdentifier = <x509_cert::ext::pkix::NameConstraints as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>> {
        // RFC 5280: the subtree lists must not be empty.
        if self.permitted_dns_names.is_empty() {
            return Err(CaKitError::InvalidInput(
                "name constraints require at least one permitted name".to_string(),
            ));
        }
        let permitted = self
            .permitted_dns_names
            .iter()
            .map(|name| {
                Ia5String::try_from(name.clone())
                    .map(|dns| GeneralSubtree {
                        base: GeneralName::DnsName(dns),
                        minimum: 0,
                        maximum: None,
                    })
                    .map_err(|e| CaKitError::InvalidInput(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let nc = x509_cert::ext::pkix::NameConstraints {
            permitted_subtrees: Some(permitted),
            excluded_subtrees: None,
        };

        Ok(nc.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let nc = x509_cert::ext::pkix::NameConstraints::from_der(extension)?;
        let permitted_dns_names = nc
            .permitted_subtrees
            .unwrap_or_default()
            .iter()
            .map(|subtree| match &subtree.base {
                GeneralName::DnsName(dns) => Ok(dns.to_string()),
                _ => Err(CaKitError::InvalidInput(
                    "Unsupported general name type".to_string(),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            permitted_dns_names,
        })
    }
}

/// Represents the Subject Key Identifier extension.
///
/// The identifier is derived from the subject public key with the
/// conventional "hash" method: SHA-1 over the public key BIT STRING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier {
    pub key_id: Vec<u8>,
}

impl SubjectKeyIdentifier {
    /// Derives the identifier from an encoded public key. The public key
    /// must already exist, which is why this extension is constructed only
    /// after the signing request does.
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Self {
        let key_id = <Sha1 as sha1::Digest>::digest(spki.subject_public_key.raw_bytes());
        Self {
            key_id: key_id.to_vec(),
        }
    }
}

impl ToAndFromX509Extension for SubjectKeyIdentifier {
    const OID: ObjectIdentifier =
        <x509_cert::ext::pkix::SubjectKeyIdentifier as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>> {
        let skid = x509_cert::ext::pkix::SubjectKeyIdentifier(
            OctetString::new(self.key_id.as_slice())
                .map_err(|e| CaKitError::EncodingError(e.to_string()))?,
        );
        Ok(skid.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let skid = x509_cert::ext::pkix::SubjectKeyIdentifier::from_der(extension)?;
        Ok(Self {
            key_id: skid.0.as_bytes().to_vec(),
        })
    }
}
