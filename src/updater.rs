//! # Certificate Updater
//!
//! Loads the certificate collection from the listing page in three passes
//! (root, intermediate, test), cross-checks the result and drives the
//! directory and lookup-table updates.
//!
//! Each pass first drops the entries of the types it governs, so any pass can
//! be re-run on its own without disturbing the others.
//!
//! ```no_run
//! use esteid_certificates::fetcher::Fetcher;
//! use esteid_certificates::updater::CertificateUpdater;
//!
//! let fetcher = Fetcher::new("https://www.skidsolutions.eu/resources/certificates/").unwrap();
//! let mut updater = CertificateUpdater::new(fetcher);
//! let plan = updater.update_directory("files", true).unwrap();
//! println!("{} certificates to add", plan.added.len());
//! ```

use std::collections::HashMap;
use std::path::Path;

use log::{debug, error};
use scraper::Html;

use crate::certificate::{Certificate, CertificateType};
use crate::common::{
    CertResult, INTERMEDIATE_TAB_ID, ROOT_CA_MARKER, ROOT_TAB_ID, SERVICE_HOST_SUFFIX,
    TEST_TAB_ID,
};
use crate::constants::LookupTable;
use crate::extractor::extract_from_tab;
use crate::fetcher::CertificateSource;
use crate::reconciler::Plan;

/// Outcome of a failed cross-check on a loaded collection.
///
/// None of these abort a run; they are logged and surface later as missing
/// files or lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckFailure {
    #[error("Expected to find exactly one root certificate, found {0}")]
    RootCount(usize),
    #[error("Expected to find exactly one test root certificate, found {0}")]
    TestRootCount(usize),
    #[error("Expected to find more than one intermediate certificate, found {0}")]
    IntermediateCount(usize),
    #[error("Expected to find more than one test certificate, found {0}")]
    TestCount(usize),
    #[error("Certificates {first} and {second} share the file name {file_name}")]
    DuplicateFileName {
        file_name: String,
        first: String,
        second: String,
    },
}

/// Owns the parsed listing page and the certificate collection built from it.
pub struct CertificateUpdater<S: CertificateSource> {
    source: S,
    document: Option<Html>,
    certificates: Vec<Certificate>,
}

impl<S: CertificateSource> CertificateUpdater<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            document: None,
            certificates: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the parsed listing page, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the fetch failure of the source. Nothing is cached in that
    /// case, the next call fetches again.
    pub fn document(&mut self) -> CertResult<&Html> {
        let document = match self.document.take() {
            Some(document) => document,
            None => Html::parse_document(&self.source.fetch_page()?),
        };
        Ok(&*self.document.insert(document))
    }

    /// Returns the collection, loading all passes if nothing is loaded yet.
    pub fn certificates(&mut self) -> CertResult<&[Certificate]> {
        if self.certificates.is_empty() {
            self.load_all()?;
        }
        Ok(&self.certificates)
    }

    /// Collection as loaded so far, without triggering any pass.
    pub fn loaded_certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn load_all(&mut self) -> CertResult<Vec<CheckFailure>> {
        self.load_root_certificates()?;
        self.load_intermediate_certificates()?;
        self.load_test_certificates()?;
        Ok(self.check())
    }

    /// Loads the root certificate, expected to be the single "Root CA" entry of
    /// the root tab.
    pub fn load_root_certificates(&mut self) -> CertResult<()> {
        let found = extract_from_tab(self.document()?, ROOT_TAB_ID, CertificateType::Root)?;
        self.retain_other_than(&[CertificateType::Root]);
        self.certificates.extend(
            found
                .into_iter()
                .filter(|certificate| certificate.title.contains(ROOT_CA_MARKER)),
        );
        Ok(())
    }

    pub fn load_intermediate_certificates(&mut self) -> CertResult<()> {
        let found = extract_from_tab(
            self.document()?,
            INTERMEDIATE_TAB_ID,
            CertificateType::Intermediate,
        )?;
        self.retain_other_than(&[CertificateType::Intermediate]);
        self.certificates.extend(found);
        Ok(())
    }

    /// Loads the test tab, where one entry is the test root and the rest are
    /// test intermediates. Per-hostname `.sk.ee` certificates are dropped.
    pub fn load_test_certificates(&mut self) -> CertResult<()> {
        let found = extract_from_tab(self.document()?, TEST_TAB_ID, CertificateType::Test)?;
        self.retain_other_than(&[CertificateType::Test, CertificateType::TestRoot]);
        for mut certificate in found {
            if certificate.title.contains(ROOT_CA_MARKER) {
                certificate.certificate_type = CertificateType::TestRoot;
            }
            if certificate.title.ends_with(SERVICE_HOST_SUFFIX) {
                debug!(
                    "Certificate {} is a service host certificate, skipping",
                    certificate.title
                );
                continue;
            }
            self.certificates.push(certificate);
        }
        Ok(())
    }

    fn retain_other_than(&mut self, types: &[CertificateType]) {
        self.certificates
            .retain(|certificate| !types.contains(&certificate.certificate_type));
    }

    /// Cross-checks the collection and logs every failure as an error.
    pub fn check(&self) -> Vec<CheckFailure> {
        let count = |certificate_type: CertificateType| {
            self.certificates
                .iter()
                .filter(|certificate| certificate.certificate_type == certificate_type)
                .count()
        };

        let mut failures = Vec::new();
        let roots = count(CertificateType::Root);
        if roots != 1 {
            failures.push(CheckFailure::RootCount(roots));
        }
        let test_roots = count(CertificateType::TestRoot);
        if test_roots != 1 {
            failures.push(CheckFailure::TestRootCount(test_roots));
        }
        let intermediates = count(CertificateType::Intermediate);
        if intermediates <= 1 {
            failures.push(CheckFailure::IntermediateCount(intermediates));
        }
        let tests = count(CertificateType::Test);
        if tests <= 1 {
            failures.push(CheckFailure::TestCount(tests));
        }

        let mut seen: HashMap<String, &Certificate> = HashMap::new();
        for certificate in &self.certificates {
            if let Some(first) = seen.insert(certificate.disk_name(), certificate) {
                failures.push(CheckFailure::DuplicateFileName {
                    file_name: certificate.disk_name(),
                    first: first.title.clone(),
                    second: certificate.title.clone(),
                });
            }
        }

        for failure in &failures {
            error!("{}", failure);
        }
        failures
    }

    /// Plans the synchronisation of `directory` with the collection, logs the
    /// plan and applies it unless `dry_run` is set.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be fetched, if the collection lacks a unique
    /// root or test root, or on any download or filesystem error while
    /// applying. An apply failure leaves the directory partially updated.
    pub fn update_directory<P: AsRef<Path>>(
        &mut self,
        directory: P,
        dry_run: bool,
    ) -> CertResult<Plan> {
        let directory = directory.as_ref();
        self.certificates()?;
        let plan = Plan::new(directory, &self.certificates)?;
        plan.log();
        if !dry_run {
            plan.apply(directory, &self.source)?;
        }
        Ok(plan)
    }

    /// Regenerates the lookup-table module at `path`.
    pub fn update_constants<P: AsRef<Path>>(&mut self, path: P) -> CertResult<LookupTable> {
        let table = LookupTable::from_certificates(self.certificates()?)?;
        table.write(path)?;
        Ok(table)
    }
}
