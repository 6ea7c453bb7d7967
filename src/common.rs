//! # Common Types and Constants
//!
//! This module provides the types shared by every stage of the updater:
//! - The crate-wide error type and result alias
//! - The markers used to recognise certificates on the SK listing page
//! - Defaults for the command line surface

use crate::certificate::CertificateType;

/// Certificate listing page published by SK ID Solutions.
pub const DEFAULT_URL: &str = "https://www.skidsolutions.eu/resources/certificates/";
/// User agent sent with every request made by the updater.
pub const USER_AGENT: &str =
    "rust-esteid-certificates updater; https://github.com/thorgate/esteid-certificates";
/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tab holding the root certificate authorities.
pub const ROOT_TAB_ID: &str = "nav-Root-CAs";
/// Tab holding the intermediate (issuer) certificate authorities.
pub const INTERMEDIATE_TAB_ID: &str = "nav-Intermediate-CAs";
/// Tab holding both the test root and the test intermediates.
pub const TEST_TAB_ID: &str = "nav-Test-certificates";

/// Class of the element wrapping a single certificate on the page.
pub const CERT_ITEM_CLASS: &str = "cert-item";
/// Class of the element holding a certificate title.
pub const TITLE_CLASS: &str = "title";
/// Status text marking a certificate as currently valid.
pub const VALID_MARKER: &str = "Valid";
/// Text of the download link pointing at the PEM encoding.
pub const PEM_LINK_TEXT: &str = "PEM";

/// Titles containing this are root authorities.
pub const ROOT_CA_MARKER: &str = "Root CA";
/// Test titles ending with this are per-hostname service certificates.
pub const SERVICE_HOST_SUFFIX: &str = ".sk.ee";

/// Extension of the certificate files kept on disk.
pub const PEM_EXTENSION: &str = "pem";

pub type CertResult<R> = Result<R, CertError>;

/// Represents errors that can occur while updating or reading the bundle
///
/// Only the conditions that abort a run live here. Problems with a single
/// certificate item or tab are logged and skipped by the extractor instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CertError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Expected an HTML document, got {0}")]
    NotHtml(String),
    #[error("IO error: {0}")]
    IO(String),
    #[error("Invalid selector: {0}")]
    Selector(String),
    #[error("No {0} certificate found")]
    MissingCertificate(CertificateType),
    #[error("Expected exactly one {kind} certificate, found {count}")]
    DuplicateCertificate { kind: CertificateType, count: usize },
    #[error("Unknown certificate: {0}")]
    UnknownCertificate(String),
}

impl From<reqwest::Error> for CertError {
    fn from(e: reqwest::Error) -> Self {
        CertError::Http(format!("{:?}", e))
    }
}

impl From<std::io::Error> for CertError {
    fn from(e: std::io::Error) -> Self {
        CertError::IO(format!("{:?}", e))
    }
}

impl From<url::ParseError> for CertError {
    fn from(e: url::ParseError) -> Self {
        CertError::InvalidUrl(e.to_string())
    }
}
