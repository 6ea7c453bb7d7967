use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use esteid_certificates::common::{CertResult, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
use esteid_certificates::fetcher::Fetcher;
use esteid_certificates::updater::CertificateUpdater;

/// Automatic updater for SK certificates
#[derive(Parser, Debug)]
#[command(name = "esteid-update", version)]
struct Cli {
    /// Directory with the certificates to update
    directory: PathBuf,

    /// URL to get the certificates from
    #[arg(long, env = "ESTEID_CERTIFICATES_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Do not update anything, just list the certificates available for download
    #[arg(long)]
    dry_run: bool,

    /// Path to the generated lookup table module to update
    #[arg(long)]
    constants: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn run(cli: Cli) -> CertResult<()> {
    let fetcher = Fetcher::with_timeout(&cli.url, cli.timeout)?;
    let mut updater = CertificateUpdater::new(fetcher);
    updater.update_directory(&cli.directory, cli.dry_run)?;
    if let Some(constants) = cli.constants.filter(|_| !cli.dry_run) {
        updater.update_constants(constants)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
