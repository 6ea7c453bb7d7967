//! # Certificate Identity
//!
//! A certificate discovered on the listing page is never parsed. It is an
//! opaque named blob: a title, the link it is downloaded from and the role it
//! plays in the bundle. The on-disk key is derived from the link.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::common::PEM_EXTENSION;

/// Suffixes stripped from the link file name, repeatedly.
const STRIPPED_SUFFIXES: [&str; 2] = [".crt", ".cer"];

/// Role of a certificate within the bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CertificateType {
    Intermediate,
    Root,
    Test,
    TestRoot,
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CertificateType::Intermediate => "intermediate",
            CertificateType::Root => "root",
            CertificateType::Test => "test",
            CertificateType::TestRoot => "test root",
        };
        f.write_str(name)
    }
}

/// One certificate found on the listing page.
///
/// `certificate_type` stays a plain field: the test pass reassigns it to
/// [`CertificateType::TestRoot`] after extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    pub title: String,
    pub link: String,
    pub certificate_type: CertificateType,
}

impl Certificate {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        certificate_type: CertificateType,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            certificate_type,
        }
    }

    /// Last path segment of the link, percent-decoded, with every trailing
    /// `.crt`/`.cer` removed.
    pub fn file_name(&self) -> String {
        let segment = link_path(&self.link)
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_owned();
        let decoded = percent_decode_str(&segment).decode_utf8_lossy().into_owned();
        strip_certificate_suffixes(&decoded).to_owned()
    }

    /// Name of the file backing this certificate inside the bundle directory.
    pub fn disk_name(&self) -> String {
        pem_file_name(&self.file_name())
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.file_name())
    }
}

/// Removes `.crt`/`.cer` suffixes until none is left.
pub fn strip_certificate_suffixes(name: &str) -> &str {
    let mut name = name;
    while let Some(stripped) = STRIPPED_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
    {
        name = stripped;
    }
    name
}

/// Appends the `.pem` extension unless the name already carries it.
pub fn pem_file_name(file_name: &str) -> String {
    let extension = format!(".{}", PEM_EXTENSION);
    if file_name.ends_with(&extension) {
        file_name.to_owned()
    } else {
        format!("{}{}", file_name, extension)
    }
}

/// Path component of a link, which may be absolute or relative to the page.
fn link_path(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => url.path().to_owned(),
        Err(_) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_owned(),
    }
}
