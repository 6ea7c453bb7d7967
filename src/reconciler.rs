//! # Directory Reconciliation
//!
//! Compares the certificate collection with the `*.pem` files of a bundle
//! directory. Files without a matching certificate are removed, every
//! certificate of the collection is (re-)downloaded. There is no content
//! comparison: a file present on both sides is always refreshed.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;

use crate::certificate::{Certificate, CertificateType};
use crate::common::{CertError, CertResult, PEM_EXTENSION};
use crate::fetcher::CertificateSource;

/// Whether a certificate file will be written for the first time or overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Added,
    Refreshed,
}

impl Change {
    fn marker(self) -> &'static str {
        match self {
            Change::Added => "+",
            Change::Refreshed => "~",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Change::Added => "created",
            Change::Refreshed => "updated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedCertificate {
    pub certificate: Certificate,
    pub change: Change,
}

/// Everything an update of a bundle directory would do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Existing file names with no certificate behind them.
    pub removed: BTreeSet<String>,
    /// File names of certificates that are not on disk yet.
    pub added: BTreeSet<String>,
    pub root: PlannedCertificate,
    pub test_root: PlannedCertificate,
    /// Sorted by file name.
    pub intermediate: Vec<PlannedCertificate>,
    /// Sorted by file name.
    pub test: Vec<PlannedCertificate>,
    /// Every certificate to download, in collection order.
    pub certificates: Vec<Certificate>,
}

impl Plan {
    /// Diffs `certificates` against the `*.pem` files in `directory`.
    ///
    /// A directory that does not exist yet is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `CertError::MissingCertificate` or
    /// `CertError::DuplicateCertificate` unless the collection holds exactly one
    /// root and one test root, and `CertError::IO` if the directory can't be
    /// listed.
    pub fn new(directory: &Path, certificates: &[Certificate]) -> CertResult<Self> {
        let existing = existing_file_names(directory)?;
        let updated: BTreeSet<String> = certificates.iter().map(Certificate::disk_name).collect();
        let removed: BTreeSet<String> = existing.difference(&updated).cloned().collect();
        let added: BTreeSet<String> = updated.difference(&existing).cloned().collect();

        let planned = |certificate: &Certificate| PlannedCertificate {
            certificate: certificate.clone(),
            change: if added.contains(&certificate.disk_name()) {
                Change::Added
            } else {
                Change::Refreshed
            },
        };
        let root = planned(single(certificates, CertificateType::Root)?);
        let test_root = planned(single(certificates, CertificateType::TestRoot)?);
        let sorted = |certificate_type: CertificateType| {
            let mut entries: Vec<PlannedCertificate> = certificates
                .iter()
                .filter(|certificate| certificate.certificate_type == certificate_type)
                .map(&planned)
                .collect();
            entries.sort_by_key(|entry| entry.certificate.file_name());
            entries
        };
        let intermediate = sorted(CertificateType::Intermediate);
        let test = sorted(CertificateType::Test);

        Ok(Self {
            removed,
            added,
            root,
            test_root,
            intermediate,
            test,
            certificates: certificates.to_vec(),
        })
    }

    pub fn log(&self) {
        info!("{} certificates to be removed:", self.removed.len());
        for file_name in &self.removed {
            info!(" * {}", file_name);
        }

        info!(
            "Root certificate will be {}: {}",
            self.root.change.verb(),
            self.root.certificate.file_name()
        );
        info!(
            "Test root certificate will be {}: {}",
            self.test_root.change.verb(),
            self.test_root.certificate.file_name()
        );

        info!(
            "{} intermediate certificates to be updated:",
            self.intermediate.len()
        );
        for entry in &self.intermediate {
            info!(" {} {}", entry.change.marker(), entry.certificate);
        }
        info!("{} test certificates to be updated:", self.test.len());
        for entry in &self.test {
            info!(" {} {}", entry.change.marker(), entry.certificate);
        }
    }

    /// Downloads every certificate into `directory`, then deletes the removed
    /// files. Nothing is rolled back on failure.
    pub fn apply<S: CertificateSource + ?Sized>(
        &self,
        directory: &Path,
        source: &S,
    ) -> CertResult<()> {
        info!("Performing update");
        fs::create_dir_all(directory)?;

        for certificate in &self.certificates {
            info!("Updating certificate {}", certificate.file_name());
            let content = source.download(&certificate.link)?;
            fs::write(directory.join(certificate.disk_name()), content)?;
        }

        for file_name in &self.removed {
            info!("Removing certificate {}", file_name);
            fs::remove_file(directory.join(file_name))?;
        }
        Ok(())
    }
}

/// The only certificate of the given type.
///
/// # Errors
///
/// Returns `CertError::MissingCertificate` if there is none and
/// `CertError::DuplicateCertificate` if there is more than one.
pub(crate) fn single(
    certificates: &[Certificate],
    certificate_type: CertificateType,
) -> CertResult<&Certificate> {
    let mut matching = certificates
        .iter()
        .filter(|certificate| certificate.certificate_type == certificate_type);
    let first = matching
        .next()
        .ok_or(CertError::MissingCertificate(certificate_type))?;
    let others = matching.count();
    if others > 0 {
        return Err(CertError::DuplicateCertificate {
            kind: certificate_type,
            count: others + 1,
        });
    }
    Ok(first)
}

fn existing_file_names(directory: &Path) -> CertResult<BTreeSet<String>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PEM_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.insert(name.to_owned());
        }
    }
    Ok(names)
}
