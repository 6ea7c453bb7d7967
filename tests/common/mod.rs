#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use esteid_certificates::common::{CertError, CertResult};
use esteid_certificates::fetcher::CertificateSource;

/// In-memory listing page that records every request made against it.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub page: String,
    pub files: HashMap<String, Vec<u8>>,
    pub page_fetches: Cell<usize>,
    pub downloads: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new(page: String) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn with_file(mut self, link: &str, content: &[u8]) -> Self {
        self.files.insert(link.to_owned(), content.to_vec());
        self
    }
}

impl CertificateSource for FakeSource {
    fn fetch_page(&self) -> CertResult<String> {
        self.page_fetches.set(self.page_fetches.get() + 1);
        Ok(self.page.clone())
    }

    fn download(&self, link: &str) -> CertResult<Vec<u8>> {
        self.downloads.borrow_mut().push(link.to_owned());
        self.files
            .get(link)
            .cloned()
            .ok_or_else(|| CertError::Http(format!("HTTP 404 Not Found from {}", link)))
    }
}

/// Page source that always fails, as an unreachable host would.
pub struct UnreachableSource;

impl CertificateSource for UnreachableSource {
    fn fetch_page(&self) -> CertResult<String> {
        Err(CertError::Http("connection refused".into()))
    }

    fn download(&self, link: &str) -> CertResult<Vec<u8>> {
        Err(CertError::Http(format!("connection refused: {}", link)))
    }
}

pub fn valid_item(title: &str, link: &str) -> String {
    format!(
        r#"<div class="cert-item">
  <div class="title">{} <span>Certificate details</span></div>
  <p>Valid</p>
  <a href="{}.der">DER</a>
  <a href="{}">PEM</a>
</div>"#,
        title, link, link
    )
}

pub fn expired_item(title: &str, link: &str) -> String {
    format!(
        r#"<div class="cert-item">
  <div class="title">{} <span>Certificate details</span></div>
  <p>Expired</p>
  <a href="{}">PEM</a>
</div>"#,
        title, link
    )
}

pub fn tab(id: &str, items: &[String]) -> String {
    format!(r#"<div class="tab-pane" id="{}">{}</div>"#, id, items.join("\n"))
}

pub fn page(tabs: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Certificates</title></head><body>{}</body></html>",
        tabs.join("\n")
    )
}

/// Valid item linking to `https://c.sk.ee/<name>.pem.crt`.
fn sk_item(title: &str, name: &str) -> String {
    valid_item(title, &format!("https://c.sk.ee/{}.pem.crt", name))
}

/// A listing shaped like the real one, passing every cross-check.
pub fn full_page() -> String {
    page(&[
        tab(
            "nav-Root-CAs",
            &[
                sk_item(
                    "EE Certification Centre Root CA",
                    "EE_Certification_Centre_Root_CA",
                ),
                sk_item("EE-GovCA2018", "EE-GovCA2018"),
            ],
        ),
        tab(
            "nav-Intermediate-CAs",
            &[
                sk_item("ESTEID2018", "esteid2018"),
                sk_item("EID-SK 2016", "EID-SK_2016"),
                expired_item("ESTEID-SK 2007", "https://c.sk.ee/ESTEID-SK_2007.pem.crt"),
            ],
        ),
        tab(
            "nav-Test-certificates",
            &[
                sk_item(
                    "TEST of EE Certification Centre Root CA",
                    "TEST_of_EE_Certification_Centre_Root_CA",
                ),
                sk_item("TEST of ESTEID2018", "TEST_of_ESTEID2018"),
                sk_item("TEST of EID-SK 2016", "TEST_of_EID-SK_2016"),
                sk_item("demo.sk.ee", "demo.sk.ee"),
            ],
        ),
    ])
}

/// Source for [`full_page`] able to serve every certificate it lists.
pub fn full_source() -> FakeSource {
    [
        "EE_Certification_Centre_Root_CA",
        "esteid2018",
        "EID-SK_2016",
        "TEST_of_EE_Certification_Centre_Root_CA",
        "TEST_of_ESTEID2018",
        "TEST_of_EID-SK_2016",
    ]
    .iter()
    .fold(FakeSource::new(full_page()), |source, name| {
        let content = format!(
            "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
            name
        );
        source.with_file(
            &format!("https://c.sk.ee/{}.pem.crt", name),
            content.as_bytes(),
        )
    })
}
