//! # Certificate Lookup
//!
//! Resolves issuer titles to files of a certificate bundle directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{CertError, CertResult};
use crate::constants::LookupTable;

/// A bundle directory together with the table describing its files.
#[derive(Clone, Debug)]
pub struct CertificateStore {
    cert_path: PathBuf,
    table: LookupTable,
}

impl CertificateStore {
    pub fn new<P: AsRef<Path>>(cert_path: P, table: LookupTable) -> Self {
        Self {
            cert_path: cert_path.as_ref().to_path_buf(),
            table,
        }
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Path of the certificate file for the given issuer.
    ///
    /// # Errors
    ///
    /// Returns `CertError::UnknownCertificate` if the issuer is not in the
    /// table. The file itself is not checked.
    pub fn certificate_file_name(&self, issuer_name: &str) -> CertResult<PathBuf> {
        let file_name = self
            .table
            .issuer_certs
            .get(issuer_name)
            .ok_or_else(|| CertError::UnknownCertificate(issuer_name.to_owned()))?;
        Ok(self.cert_path.join(file_name))
    }

    pub fn certificate(&self, issuer_name: &str) -> CertResult<Vec<u8>> {
        Ok(fs::read(self.certificate_file_name(issuer_name)?)?)
    }

    pub fn root_ca_file_name(&self, test: bool) -> PathBuf {
        let file_name = if test {
            &self.table.test_root_ca_file_name
        } else {
            &self.table.root_ca_file_name
        };
        self.cert_path.join(file_name)
    }

    pub fn root_certificate(&self, test: bool) -> CertResult<Vec<u8>> {
        Ok(fs::read(self.root_ca_file_name(test))?)
    }
}
