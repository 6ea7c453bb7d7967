//! # Tab Extraction
//!
//! The listing page groups certificates into tabs. Each tab is a `div` with a
//! well known id containing `div.cert-item` elements shaped roughly like:
//!
//! ```html
//! <div class="cert-item">
//!   <div class="title">ESTEID2018 <span>issued by ...</span></div>
//!   <p>Valid</p>
//!   <a href="https://c.sk.ee/esteid2018.pem.crt">PEM</a>
//! </div>
//! ```
//!
//! Extraction is best effort. A missing tab or a malformed item is logged and
//! skipped, the rest of the tab is still returned.

use log::{debug, error, info};
use scraper::{ElementRef, Html, Node, Selector};

use crate::certificate::{Certificate, CertificateType};
use crate::common::{
    CertError, CertResult, CERT_ITEM_CLASS, PEM_LINK_TEXT, TITLE_CLASS, VALID_MARKER,
};

/// Compiled selectors for the certificate markup.
struct Selectors {
    tab: Selector,
    item: Selector,
    title: Selector,
    status: Selector,
    link: Selector,
}

impl Selectors {
    fn new() -> CertResult<Self> {
        Ok(Self {
            tab: parse_selector("div[id]")?,
            item: parse_selector(&format!("div.{}", CERT_ITEM_CLASS))?,
            title: parse_selector(&format!("div.{}", TITLE_CLASS))?,
            status: parse_selector("p")?,
            link: parse_selector("a")?,
        })
    }
}

fn parse_selector(selector: &str) -> CertResult<Selector> {
    Selector::parse(selector).map_err(|e| CertError::Selector(format!("{}: {}", selector, e)))
}

/// Collects the valid certificates listed in the tab with the given id, in
/// page order, all tagged with `certificate_type`.
///
/// # Errors
///
/// Only fails if the built-in selectors cannot be compiled. Problems with the
/// page content are logged and yield fewer (possibly zero) certificates.
pub fn extract_from_tab(
    document: &Html,
    tab_id: &str,
    certificate_type: CertificateType,
) -> CertResult<Vec<Certificate>> {
    let selectors = Selectors::new()?;

    let Some(tab) = document
        .select(&selectors.tab)
        .find(|element| element.value().id() == Some(tab_id))
    else {
        error!("Could not find certificates tab #{}", tab_id);
        return Ok(Vec::new());
    };

    let items: Vec<ElementRef> = tab.select(&selectors.item).collect();
    if items.is_empty() {
        error!("No certificates found in tab #{}", tab_id);
        return Ok(Vec::new());
    }

    info!("Found {} certificates in tab #{}", items.len(), tab_id);
    Ok(items
        .into_iter()
        .filter_map(|item| extract_item(&selectors, item, certificate_type))
        .collect())
}

fn extract_item(
    selectors: &Selectors,
    item: ElementRef,
    certificate_type: CertificateType,
) -> Option<Certificate> {
    let Some(title) = item_title(selectors, item) else {
        error!("Could not get title for certificate {}", item.html());
        return None;
    };

    debug!("Found certificate {}", title);
    let valid = item
        .select(&selectors.status)
        .any(|status| element_text(status) == VALID_MARKER);
    if !valid {
        debug!("Certificate {} is not valid, skipping", title);
        return None;
    }

    let link = item
        .select(&selectors.link)
        .find(|link| element_text(*link) == PEM_LINK_TEXT)
        .and_then(|link| link.value().attr("href"));
    let Some(link) = link else {
        error!("Valid certificate {} has no download link we could use.", title);
        return None;
    };

    let certificate = Certificate::new(title, link, certificate_type);
    if certificate.file_name().is_empty() {
        error!(
            "Valid certificate {} links to {} which names no file",
            certificate.title, link
        );
        return None;
    }
    Some(certificate)
}

/// The title is the text node in front of the `<span>` with additional info,
/// so only the first child of the title element is used.
fn item_title(selectors: &Selectors, item: ElementRef) -> Option<String> {
    let title_element = item.select(&selectors.title).next()?;
    let first_child = title_element.first_child()?;
    let title = match first_child.value() {
        Node::Text(text) => text.trim().to_owned(),
        Node::Element(_) => element_text(ElementRef::wrap(first_child)?),
        _ => return None,
    };
    if title.is_empty() {
        return None;
    }
    Some(title)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}
