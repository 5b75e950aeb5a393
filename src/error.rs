use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CaKitError>;

/// Represents errors that can occur while issuing a certificate authority.
///
/// CA creation is all-or-nothing: every variant aborts the operation that
/// produced it, and no partially built certificate or key is ever returned.
#[derive(Debug, Error, Clone)]
pub enum CaKitError {
    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while drawing the certificate serial number from the OS RNG.
    #[error("Serial number generation error: {0}")]
    SerialGenerationError(String),

    /// Error during RSA key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// An X.509v3 extension OID/value pair was rejected during construction.
    #[error("Extension construction error: {0}")]
    ExtensionError(String),

    /// Error building or finalizing the certificate signing request.
    #[error("Certificate request error: {0}")]
    RequestError(String),

    /// Error producing the certificate signature.
    #[error("Signing error: {0}")]
    SigningError(String),
}

impl From<der::Error> for CaKitError {
    /// Converts a `der::Error` into a `CaKitError`.
    fn from(err: der::Error) -> Self {
        CaKitError::DecodingError(err.to_string())
    }
}
