use bon::Builder;

/// Hash algorithm used for the CSR and certificate signatures.
///
/// Only the SHA-2 family is supported; keys are always RSA, so each variant
/// maps to the matching `sha*WithRSAEncryption` signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

/// Diagnostic output level for CA creation.
///
/// `Verbose` emits progress messages for the key generation, CSR generation
/// and signing steps. `Debug` additionally announces SubjectKeyIdentifier
/// construction and feeds the in-progress CSR to the caller's sink, if one
/// was provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// Caller-supplied parameters for CA creation.
///
/// Read-only for the duration of the operation. Validation happens upstream:
/// in particular `hostname` must be non-empty and is not re-checked here.
///
/// # Fields
/// * `hostname` - The primary DNS name the CA is scoped to.
/// * `subject_alt_names` - Additional DNS names, in the order they should
///   appear in the name constraints.
/// * `country`, `state`, `locality`, `org`, `org_unit` - Subject
///   distinguished-name attributes; omitted components are left out of the
///   encoded name.
/// * `lifetime_days` - Validity period of the issued certificate.
/// * `hash_fn` - Signature hash algorithm.
/// * `verbosity` - Diagnostic output level.
#[derive(Debug, Clone, Builder)]
pub struct Options {
    pub hostname: String,
    #[builder(default)]
    pub subject_alt_names: Vec<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub org: Option<String>,
    pub org_unit: Option<String>,
    #[builder(default = 3650)]
    pub lifetime_days: i64,
    #[builder(default)]
    pub hash_fn: HashAlgorithm,
    #[builder(default)]
    pub verbosity: Verbosity,
}
