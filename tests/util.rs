use std::sync::OnceLock;

use cakit::authority::create_private_ca_with_csr_sink;
use cakit::cert::CertificateWithPrivateKey;
use cakit::options::{Options, Verbosity};

pub struct TestCa {
    pub ca: CertificateWithPrivateKey,
    /// CSR PEMs captured by the debug sink during creation.
    pub csr_dumps: Vec<String>,
}

static CA: OnceLock<TestCa> = OnceLock::new();

pub fn test_options() -> Options {
    Options::builder()
        .hostname("example.com".to_string())
        .subject_alt_names(vec![
            "alt1.example.com".to_string(),
            "alt2.example.com".to_string(),
        ])
        .country("US".to_string())
        .state("Massachusetts".to_string())
        .locality("Cambridge".to_string())
        .org("Example Corp".to_string())
        .org_unit("Infrastructure".to_string())
        .lifetime_days(398)
        .verbosity(Verbosity::Debug)
        .build()
}

/// 4096-bit key generation is expensive, so every test in this binary shares
/// one CA.
pub fn test_ca() -> &'static TestCa {
    CA.get_or_init(|| {
        let mut csr_dumps = Vec::new();
        let mut sink = |csr_pem: &str| csr_dumps.push(csr_pem.to_string());
        let ca = create_private_ca_with_csr_sink(&test_options(), Some(&mut sink))
            .expect("CA creation failed");
        TestCa { ca, csr_dumps }
    })
}
