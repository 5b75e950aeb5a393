use rand_core::OsRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::EncodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{CaKitError, Result};
use crate::options::HashAlgorithm;

/// An RSA key pair owned by the issuance flow until handed to the caller.
///
/// The private key is never persisted by this crate; writing it out is the
/// caller's responsibility (see [`KeyPair::to_pkcs8_pem`]).
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generate an RSA key pair with the given modulus size and public
    /// exponent.
    pub fn generate_rsa(bits: usize, exponent: u64) -> Result<Self> {
        let mut rng = OsRng;
        let private = RsaPrivateKey::new_with_exp(&mut rng, bits, &BigUint::from(exponent))
            .map_err(|e| CaKitError::KeyGenerationError(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// The public half of the pair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_key_pair(self)
    }

    /// Encodes the public key as a SubjectPublicKeyInfo structure.
    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        SubjectPublicKeyInfoOwned::from_key(self.public.clone())
            .map_err(|e| CaKitError::EncodingError(e.to_string()))
    }

    /// Signs `data` with PKCS#1 v1.5 padding over the given hash.
    pub fn sign(&self, hash: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        let signature = match hash {
            HashAlgorithm::Sha256 => SigningKey::<Sha256>::new(self.private.clone())
                .try_sign(data)
                .map(|s| s.to_vec()),
            HashAlgorithm::Sha384 => SigningKey::<Sha384>::new(self.private.clone())
                .try_sign(data)
                .map(|s| s.to_vec()),
            HashAlgorithm::Sha512 => SigningKey::<Sha512>::new(self.private.clone())
                .try_sign(data)
                .map(|s| s.to_vec()),
        };
        signature.map_err(|e| CaKitError::SigningError(e.to_string()))
    }

    /// Exports the private key as PKCS#8 PEM for the caller's output writer.
    pub fn to_pkcs8_pem(&self) -> Result<String> {
        Ok(self
            .private
            .to_pkcs8_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CaKitError::EncodingError(e.to_string()))?
            .to_string())
    }
}

/// The public half of a [`KeyPair`].
#[derive(Debug, Clone)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        Self(key_pair.public.clone())
    }

    pub fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Verifies a PKCS#1 v1.5 signature over `data`.
    pub fn verify(&self, hash: HashAlgorithm, data: &[u8], signature: &[u8]) -> Result<()> {
        let signature = Signature::try_from(signature)
            .map_err(|e| CaKitError::DecodingError(e.to_string()))?;
        let verified = match hash {
            HashAlgorithm::Sha256 => {
                VerifyingKey::<Sha256>::new(self.0.clone()).verify(data, &signature)
            }
            HashAlgorithm::Sha384 => {
                VerifyingKey::<Sha384>::new(self.0.clone()).verify(data, &signature)
            }
            HashAlgorithm::Sha512 => {
                VerifyingKey::<Sha512>::new(self.0.clone()).verify(data, &signature)
            }
        };
        verified.map_err(|e| CaKitError::SigningError(e.to_string()))
    }
}
