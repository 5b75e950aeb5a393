//! # CaKit - Private Certificate Authority Bootstrap
//!
//! CaKit issues self-signed private Certificate Authority (CA) certificates,
//! built entirely with rustcrypto libraries and without dependencies on ring
//! or openssl (except for testing). It covers the standard TLS bootstrap
//! pattern for environments without an external PKI: construct the CA's
//! identity and extension set, generate its keypair, build and finalize a
//! certificate signing request, and self-sign the result with correctly
//! scoped constraints.
//!
//! ## What the issued CA looks like
//!
//! - RSA 4096-bit key with public exponent 65537, always.
//! - Common Name `ca-<serial>.<hostname>`, unique per run.
//! - Key Usage (critical): digitalSignature, keyEncipherment, keyCertSign.
//! - Basic Constraints: CA:TRUE.
//! - Name Constraints: signing authority permitted only for the hostname,
//!   the subject alternative names, and the CA's own Common Name.
//! - Subject Key Identifier: SHA-1 hash of the subject public key.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cakit::authority::create_private_ca;
//! use cakit::options::Options;
//!
//! # fn main() -> Result<(), cakit::error::CaKitError> {
//! let options = Options::builder()
//!     .hostname("service.example.com".to_string())
//!     .subject_alt_names(vec!["alt.example.com".to_string()])
//!     .org("Example Corp".to_string())
//!     .country("US".to_string())
//!     .build();
//!
//! let ca = create_private_ca(&options)?;
//!
//! // The caller owns both artifacts; persisting them is its job.
//! println!("{}", ca.cert.to_pem()?);
//! println!("{}", ca.key.to_pkcs8_pem()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Debug diagnostics
//!
//! At `Verbosity::Debug` the in-progress CSR can be captured through an
//! injected sink instead of a hard-coded dump file:
//!
//! ```rust,no_run
//! use cakit::authority::create_private_ca_with_csr_sink;
//! use cakit::options::{Options, Verbosity};
//!
//! # fn main() -> Result<(), cakit::error::CaKitError> {
//! let options = Options::builder()
//!     .hostname("service.example.com".to_string())
//!     .verbosity(Verbosity::Debug)
//!     .build();
//!
//! let mut sink = |csr_pem: &str| {
//!     let _ = std::fs::write("./debug-ca.csr", csr_pem);
//! };
//! let ca = create_private_ca_with_csr_sink(&options, Some(&mut sink))?;
//! # let _ = ca;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! CA creation is all-or-nothing. Every step propagates its failure
//! immediately as a [`error::CaKitError`], with the underlying library's
//! diagnostic carried in the message; no certificate or key is returned on
//! any failure path.
//!
//! ## Module Organization
//!
//! - [`authority`]: The CA issuance flow and its key-size constants
//! - [`options`]: Caller-supplied parameters, hash and verbosity enums
//! - [`cert`]: Certificate types, signature algorithms and X.509 extensions
//! - [`csr`]: Certificate request builder and finalization
//! - [`key`]: RSA key generation and signing
//! - [`serial`]: Random certificate serial numbers
//! - [`issuer`]: The signing seam (self-issuance)
//! - [`error`]: Error types

pub mod authority;
pub mod cert;
pub mod csr;
pub mod error;
pub mod issuer;
pub mod key;
pub mod options;
pub mod pem_utils;
pub mod serial;
pub mod tbs_certificate;
