//! # Lookup Table Generation
//!
//! Builds the issuer title to file name tables used by [`crate::lookup`] and
//! renders them as a generated Rust module.
//!
//! The table names are kept for compatibility with existing consumers, even
//! though they read inverted: `TEST_CERTS` holds every certificate that is
//! *not* tagged as a test intermediate, `LIVE_CERTS` every certificate that is
//! not a live intermediate.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::certificate::{Certificate, CertificateType};
use crate::common::CertResult;
use crate::reconciler::single;

/// Title to file name tables for one certificate collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupTable {
    pub test_certs: BTreeMap<String, String>,
    pub live_certs: BTreeMap<String, String>,
    /// Union of both tables; `live_certs` wins when a title is in both.
    pub issuer_certs: BTreeMap<String, String>,
    pub root_ca_file_name: String,
    pub test_root_ca_file_name: String,
}

impl LookupTable {
    /// # Errors
    ///
    /// Returns `CertError::MissingCertificate` or
    /// `CertError::DuplicateCertificate` unless the collection holds exactly one
    /// root and one test root.
    pub fn from_certificates(certificates: &[Certificate]) -> CertResult<Self> {
        let table = |excluded: CertificateType| -> BTreeMap<String, String> {
            certificates
                .iter()
                .filter(|certificate| certificate.certificate_type != excluded)
                .map(|certificate| (certificate.title.clone(), certificate.disk_name()))
                .collect()
        };
        let test_certs = table(CertificateType::Test);
        let live_certs = table(CertificateType::Intermediate);

        let mut issuer_certs = test_certs.clone();
        issuer_certs.extend(live_certs.clone());

        let root_ca_file_name = single(certificates, CertificateType::Root)?.disk_name();
        let test_root_ca_file_name = single(certificates, CertificateType::TestRoot)?.disk_name();

        Ok(Self {
            test_certs,
            live_certs,
            issuer_certs,
            root_ca_file_name,
            test_root_ca_file_name,
        })
    }

    /// Rebuilds a table from the constants of a module written by [`render`].
    ///
    /// ```ignore
    /// mod generated {
    ///     include!("constants.rs");
    /// }
    ///
    /// let table = LookupTable::from_generated(
    ///     generated::TEST_CERTS,
    ///     generated::LIVE_CERTS,
    ///     generated::ISSUER_CERTS,
    ///     generated::ROOT_CA_FILE_NAME,
    ///     generated::TEST_ROOT_CA_FILE_NAME,
    /// );
    /// ```
    ///
    /// [`render`]: LookupTable::render
    pub fn from_generated(
        test_certs: &[(&str, &str)],
        live_certs: &[(&str, &str)],
        issuer_certs: &[(&str, &str)],
        root_ca_file_name: &str,
        test_root_ca_file_name: &str,
    ) -> Self {
        Self {
            test_certs: to_map(test_certs),
            live_certs: to_map(live_certs),
            issuer_certs: to_map(issuer_certs),
            root_ca_file_name: root_ca_file_name.to_owned(),
            test_root_ca_file_name: test_root_ca_file_name.to_owned(),
        }
    }

    /// Renders the table as Rust source.
    pub fn render(&self) -> String {
        let mut out = format!(
            "// This file is autogenerated using esteid-update on {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        render_map(&mut out, "TEST_CERTS", &self.test_certs);
        render_map(&mut out, "LIVE_CERTS", &self.live_certs);
        render_map(&mut out, "ISSUER_CERTS", &self.issuer_certs);
        let _ = writeln!(
            out,
            "pub const ROOT_CA_FILE_NAME: &str = {:?};",
            self.root_ca_file_name
        );
        let _ = writeln!(
            out,
            "pub const TEST_ROOT_CA_FILE_NAME: &str = {:?};",
            self.test_root_ca_file_name
        );
        out
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> CertResult<()> {
        let path = path.as_ref();
        info!("Updating constants file {}", path.display());
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn to_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(title, file_name)| (title.to_string(), file_name.to_string()))
        .collect()
}

fn render_map(out: &mut String, name: &str, entries: &BTreeMap<String, String>) {
    let _ = writeln!(out, "pub const {}: &[(&str, &str)] = &[", name);
    for (title, file_name) in entries {
        let _ = writeln!(out, "    ({:?}, {:?}),", title, file_name);
    }
    out.push_str("];\n\n");
}
