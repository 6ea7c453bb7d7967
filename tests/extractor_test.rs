mod common;

use esteid_certificates::certificate::{Certificate, CertificateType};
use esteid_certificates::common::CertResult;
use esteid_certificates::extractor::extract_from_tab;
use scraper::Html;

use common::{expired_item, page, tab, valid_item};

fn extract(html: &str, tab_id: &str) -> CertResult<Vec<Certificate>> {
    extract_from_tab(&Html::parse_document(html), tab_id, CertificateType::Intermediate)
}

/// A valid item built from raw title and link markup.
fn item(title: &str, link: &str) -> String {
    format!(r#"<div class="cert-item">{}<p>Valid</p>{}</div>"#, title, link)
}

#[test]
fn test_extracts_valid_items_in_page_order() -> CertResult<()> {
    let html = page(&[tab(
        "nav-Intermediate-CAs",
        &[
            valid_item("ESTEID2018", "https://c.sk.ee/esteid2018.pem.crt"),
            expired_item("ESTEID-SK 2011", "https://c.sk.ee/ESTEID-SK_2011.pem.crt"),
            valid_item("EID-SK 2016", "https://c.sk.ee/EID-SK_2016.pem.crt"),
        ],
    )]);

    let certificates = extract(&html, "nav-Intermediate-CAs")?;
    assert_eq!(
        vec![
            Certificate::new(
                "ESTEID2018",
                "https://c.sk.ee/esteid2018.pem.crt",
                CertificateType::Intermediate,
            ),
            Certificate::new(
                "EID-SK 2016",
                "https://c.sk.ee/EID-SK_2016.pem.crt",
                CertificateType::Intermediate,
            ),
        ],
        certificates
    );
    Ok(())
}

#[test]
fn test_only_the_requested_tab_is_read() -> CertResult<()> {
    let html = page(&[
        tab(
            "nav-Root-CAs",
            &[valid_item("EE Root CA", "https://c.sk.ee/ee-root.cer")],
        ),
        tab(
            "nav-Intermediate-CAs",
            &[valid_item("ESTEID2018", "https://c.sk.ee/esteid2018.pem.cer")],
        ),
    ]);

    let certificates = extract(&html, "nav-Root-CAs")?;
    assert_eq!(1, certificates.len());
    assert_eq!("EE Root CA", certificates[0].title);
    assert_eq!(CertificateType::Intermediate, certificates[0].certificate_type);
    Ok(())
}

#[test]
fn test_missing_tab_yields_nothing() -> CertResult<()> {
    let html = page(&[tab(
        "nav-Root-CAs",
        &[valid_item("EE Root CA", "https://c.sk.ee/ee-root.cer")],
    )]);
    assert!(extract(&html, "nav-Test-certificates")?.is_empty());
    Ok(())
}

#[test]
fn test_empty_tab_yields_nothing() -> CertResult<()> {
    let html = page(&[tab("nav-Intermediate-CAs", &[])]);
    assert!(extract(&html, "nav-Intermediate-CAs")?.is_empty());
    Ok(())
}

#[test]
fn test_malformed_items_are_skipped() -> CertResult<()> {
    let no_title_element = item("", r#"<a href="https://c.sk.ee/a.pem.crt">PEM</a>"#);
    let empty_title = item(
        r#"<div class="title"></div>"#,
        r#"<a href="https://c.sk.ee/b.pem.crt">PEM</a>"#,
    );
    let no_pem_link = item(
        r#"<div class="title">NO PEM</div>"#,
        r#"<a href="https://c.sk.ee/c.der">DER</a>"#,
    );
    let no_href = item(r#"<div class="title">NO HREF</div>"#, "<a>PEM</a>");
    let no_file = item(
        r#"<div class="title">NO FILE</div>"#,
        r#"<a href="https://c.sk.ee/">PEM</a>"#,
    );
    let html = page(&[tab(
        "nav-Intermediate-CAs",
        &[
            no_title_element,
            empty_title,
            no_pem_link,
            no_href,
            no_file,
            valid_item("ESTEID2018", "https://c.sk.ee/esteid2018.pem.crt"),
        ],
    )]);

    let certificates = extract(&html, "nav-Intermediate-CAs")?;
    assert_eq!(1, certificates.len());
    assert_eq!("ESTEID2018", certificates[0].title);
    Ok(())
}

#[test]
fn test_title_is_the_text_in_front_of_the_details() -> CertResult<()> {
    let klass3 = r#"<div class="cert-item">
        <div class="title">
            KLASS3-SK 2016
            <span>SHA384 | valid until 2031</span>
        </div>
        <p>Valid</p>
        <a href="https://c.sk.ee/KLASS3-SK_2016_EECCRCA_SHA384.pem.crt">PEM</a>
    </div>"#;
    let html = page(&[tab("nav-Intermediate-CAs", &[klass3.to_owned()])]);

    let certificates = extract(&html, "nav-Intermediate-CAs")?;
    assert_eq!("KLASS3-SK 2016", certificates[0].title);
    assert_eq!("KLASS3-SK_2016_EECCRCA_SHA384.pem", certificates[0].file_name());
    Ok(())
}

#[test]
fn test_title_wrapped_in_element() -> CertResult<()> {
    let wrapped = item(
        r#"<div class="title"><strong>EID-SK 2016</strong><span>details</span></div>"#,
        r#"<a href="https://c.sk.ee/EID-SK_2016.pem.crt">PEM</a>"#,
    );
    let html = page(&[tab("nav-Intermediate-CAs", &[wrapped])]);

    let certificates = extract(&html, "nav-Intermediate-CAs")?;
    assert_eq!("EID-SK 2016", certificates[0].title);
    Ok(())
}
