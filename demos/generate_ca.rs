use cakit::authority::create_private_ca_with_csr_sink;
use cakit::error::CaKitError;
use cakit::options::{Options, Verbosity};

fn main() -> Result<(), CaKitError> {
    let options = Options::builder()
        .hostname("service.example.com".to_string())
        .subject_alt_names(vec!["alt.example.com".to_string()])
        .org("Example Corp".to_string())
        .country("US".to_string())
        .verbosity(Verbosity::Debug)
        .build();

    // At debug verbosity the in-progress CSR is offered to this sink; the
    // demo persists it next to the working directory.
    let mut sink = |csr_pem: &str| {
        if let Err(err) = std::fs::write("./debug-ca.csr", csr_pem) {
            eprintln!("could not write debug CSR: {err}");
        }
    };

    let ca = create_private_ca_with_csr_sink(&options, Some(&mut sink))?;

    println!("CA Certificate PEM:\n{}", ca.cert.to_pem()?);
    println!("CA Private Key PEM:\n{}", ca.key.to_pkcs8_pem()?);

    Ok(())
}
