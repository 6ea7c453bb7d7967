//! # Page and Certificate Fetching
//!
//! All network access of the updater goes through [`CertificateSource`]: one
//! request for the listing page and one request per certificate when the
//! directory is synchronised. Requests are blocking and never retried.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::common::{CertError, CertResult, DEFAULT_TIMEOUT_SECS, USER_AGENT};

/// Where the listing page and the certificates themselves come from.
pub trait CertificateSource {
    /// Returns the HTML of the certificate listing page.
    fn fetch_page(&self) -> CertResult<String>;

    /// Returns the raw content behind a certificate link found on the page.
    fn download(&self, link: &str) -> CertResult<Vec<u8>>;
}

/// HTTP implementation of [`CertificateSource`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: Url,
}

impl Fetcher {
    pub fn new(url: &str) -> CertResult<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a fetcher for the given listing page.
    ///
    /// # Errors
    ///
    /// Returns `CertError::InvalidUrl` if the URL does not parse or is not
    /// HTTP(S), and `CertError::Http` if the client cannot be built.
    pub fn with_timeout(url: &str, timeout_secs: u64) -> CertResult<Self> {
        let url =
            Url::parse(url).map_err(|e| CertError::InvalidUrl(format!("{}: {}", url, e)))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(CertError::InvalidUrl(format!(
                    "Unsupported URL scheme '{}' (must be http or https)",
                    scheme
                )));
            }
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolves a link from the page, which may be relative, to an absolute URL.
    pub fn resolve(&self, link: &str) -> CertResult<Url> {
        Ok(self.url.join(link)?)
    }

    fn get(&self, url: Url) -> CertResult<reqwest::blocking::Response> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;
        if !response.status().is_success() {
            return Err(CertError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        Ok(response)
    }
}

impl CertificateSource for Fetcher {
    fn fetch_page(&self) -> CertResult<String> {
        let response = self.get(self.url.clone())?;
        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default().to_owned();
            if !content_type.contains("html") {
                return Err(CertError::NotHtml(content_type));
            }
        }
        Ok(response.text()?)
    }

    fn download(&self, link: &str) -> CertResult<Vec<u8>> {
        let response = self.get(self.resolve(link)?)?;
        Ok(response.bytes()?.to_vec())
    }
}
