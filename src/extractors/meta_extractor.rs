//! OpenGraph / meta tag and `<title>` readers.
//!
//! Real-world markup orders attributes inconsistently and mixes
//! `property=` with `name=`, so the lookup probes several spellings
//! instead of relying on a single attribute sequence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::decode_html_entities;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());

/// Pull the content of a `<meta>` tag identified by its `property` or
/// `name` attribute, e.g. `og:title`. Case-insensitive; the first match
/// wins; returns an empty string when the tag is absent. The captured
/// value is entity-decoded before it is returned.
pub fn extract_meta_content(html: &str, property: &str) -> String {
    let escaped = regex::escape(property);
    let patterns = [
        // property= before content=
        format!(r#"(?i)<meta[^>]*property=["']{escaped}["'][^>]*content=["']([^"']+)["']"#),
        // name= before content=
        format!(r#"(?i)<meta[^>]*name=["']{escaped}["'][^>]*content=["']([^"']+)["']"#),
        // content= before property=/name=
        format!(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*(?:property|name)=["']{escaped}["']"#),
    ];

    for pattern in &patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(content) = re.captures(html).and_then(|caps| caps.get(1)) {
            return decode_html_entities(content.as_str());
        }
    }

    String::new()
}

/// First `<title>…</title>` in the document, trimmed and entity-decoded;
/// empty string when absent.
pub fn extract_page_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_html_entities(m.as_str().trim()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_property_before_content() {
        let html = r#"<meta property="og:title" content="Backend Engineer at Acme">"#;
        assert_eq!(
            extract_meta_content(html, "og:title"),
            "Backend Engineer at Acme"
        );
    }

    #[test]
    fn test_meta_name_spelling() {
        let html = r#"<meta name="og:site_name" content="Acme Careers">"#;
        assert_eq!(extract_meta_content(html, "og:site_name"), "Acme Careers");
    }

    #[test]
    fn test_meta_content_before_property() {
        let html = r#"<meta content="Acme Careers" property="og:site_name">"#;
        assert_eq!(extract_meta_content(html, "og:site_name"), "Acme Careers");
    }

    #[test]
    fn test_meta_case_insensitive_and_single_quotes() {
        let html = r#"<META PROPERTY='og:title' CONTENT='Data Engineer'>"#;
        assert_eq!(extract_meta_content(html, "og:title"), "Data Engineer");
    }

    #[test]
    fn test_meta_decodes_entities() {
        let html = r#"<meta property="og:title" content="Q&amp;A Engineer">"#;
        assert_eq!(extract_meta_content(html, "og:title"), "Q&A Engineer");
    }

    #[test]
    fn test_meta_missing_returns_empty() {
        assert_eq!(extract_meta_content("<html></html>", "og:title"), "");
    }

    #[test]
    fn test_page_title() {
        let html = "<html><head><title> Senior Rust Engineer &amp; Lead </title></head></html>";
        assert_eq!(extract_page_title(html), "Senior Rust Engineer & Lead");
    }

    #[test]
    fn test_page_title_with_attributes() {
        let html = r#"<title data-rh="true">Platform Engineer</title>"#;
        assert_eq!(extract_page_title(html), "Platform Engineer");
    }

    #[test]
    fn test_page_title_missing_returns_empty() {
        assert_eq!(extract_page_title("<html><body></body></html>"), "");
    }
}
