//! JSON-LD `JobPosting` extraction.
//!
//! Scans `<script type="application/ld+json">` blocks located by pattern
//! matching over the raw text, parses each as JSON and looks for a
//! schema.org `JobPosting` — directly or inside a `@graph` array. Blocks
//! that fail to parse are skipped; the remaining blocks still apply.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::Draft;
use crate::text::clean_text;

static LD_JSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type=["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .unwrap()
});

/// Job title and hiring organization from the document's JSON-LD, merged
/// across blocks with the first non-empty value winning per field.
pub(crate) fn extract_jsonld_job(html: &str) -> Draft {
    let mut draft = Draft::default();

    for caps in LD_JSON_RE.captures_iter(html) {
        let raw = match caps.get(1) {
            Some(m) => m.as_str().trim(),
            None => continue,
        };
        if raw.is_empty() {
            continue;
        }

        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => continue,
        };

        if let Some(job) = find_job_posting(&parsed) {
            debug!("JSON-LD JobPosting block matched");
            draft = draft.or(job_fields(job));
            if draft.is_complete() {
                break;
            }
        }
    }

    draft
}

/// The value itself when typed `JobPosting`, else the first `JobPosting`
/// inside its `@graph` array.
fn find_job_posting(value: &Value) -> Option<&Value> {
    if type_is(value, "JobPosting") {
        return Some(value);
    }
    value
        .get("@graph")?
        .as_array()?
        .iter()
        .find(|item| type_is(item, "JobPosting"))
}

fn type_is(value: &Value, type_name: &str) -> bool {
    value.get("@type").and_then(Value::as_str) == Some(type_name)
}

fn job_fields(job: &Value) -> Draft {
    Draft {
        job_title: job
            .get("title")
            .and_then(Value::as_str)
            .map(clean_text)
            .filter(|title| !title.is_empty()),
        company_name: hiring_organization(job),
    }
}

/// `hiringOrganization` is either a bare string or an object carrying a
/// `name` field.
fn hiring_organization(job: &Value) -> Option<String> {
    let company = match job.get("hiringOrganization")? {
        Value::String(name) => clean_text(name),
        Value::Object(org) => org
            .get("name")
            .and_then(Value::as_str)
            .map(clean_text)
            .unwrap_or_default(),
        _ => return None,
    };
    if company.is_empty() {
        None
    } else {
        Some(company)
    }
}
