//! Job-field extraction pipeline.
//!
//! Each module contributes one extraction source; this module owns the
//! stage ordering and the per-field merge. A field is set by the first
//! stage that produces a non-empty value and never overwritten after
//! that.

mod jsonld_extractor;
mod meta_extractor;
mod site_rules;

pub use meta_extractor::{extract_meta_content, extract_page_title};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::text::clean_text;
use jsonld_extractor::extract_jsonld_job;
use site_rules::apply_site_rules;

/// Best-effort extraction result. Fields are empty strings when nothing
/// was found; `success` is true iff at least one field is non-empty.
/// `error` is reserved for the fetch layer and always `None` here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub job_title: String,
    pub company_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Partial extraction state. Stages produce drafts that are merged with
/// [`Draft::or`], so an earlier non-empty value always wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Draft {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

impl Draft {
    pub(crate) fn title(job_title: Option<String>) -> Self {
        Self {
            job_title,
            company_name: None,
        }
    }

    pub(crate) fn company(company_name: Option<String>) -> Self {
        Self {
            job_title: None,
            company_name,
        }
    }

    /// Fill-if-absent merge: `self` keeps whatever it already has.
    pub(crate) fn or(self, other: Draft) -> Draft {
        Draft {
            job_title: self.job_title.or(other.job_title),
            company_name: self.company_name.or(other.company_name),
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.job_title.is_some() && self.company_name.is_some()
    }
}

/// Per-call page context shared by all stages: the raw document plus the
/// meta and title reads every stage may fall back on.
pub(crate) struct PageContext<'a> {
    pub html: &'a str,
    pub hostname: &'a str,
    pub url: Option<&'a str>,
    pub og_title: String,
    pub og_site_name: String,
    pub page_title: String,
}

impl PageContext<'_> {
    /// og:title when present, else the page title.
    pub(crate) fn best_title(&self) -> &str {
        if self.og_title.is_empty() {
            &self.page_title
        } else {
            &self.og_title
        }
    }
}

/// `Some` for values with visible content, `None` otherwise. Keeps
/// whitespace-only matches from claiming a field.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Extract a job title and company name from one fetched HTML document.
///
/// `hostname` selects the site-specific heuristics; `url` feeds the
/// URL-slug tactics of boards that encode the company in the path.
/// Never fails: malformed input degrades to empty fields and
/// `success = false`.
pub fn extract_job_info(html: &str, hostname: &str, url: Option<&str>) -> ExtractionResult {
    let ctx = PageContext {
        html,
        hostname,
        url,
        og_title: extract_meta_content(html, "og:title"),
        og_site_name: extract_meta_content(html, "og:site_name"),
        page_title: extract_page_title(html),
    };

    let mut draft = apply_site_rules(&ctx);
    if !draft.is_complete() {
        draft = draft.or(generic_title_patterns(&ctx));
    }
    if !draft.is_complete() {
        draft = draft.or(extract_jsonld_job(html));
    }
    if draft.company_name.is_none() {
        draft.company_name = non_empty(ctx.og_site_name.clone());
    }
    if draft.job_title.is_none() {
        draft.job_title = non_empty(cleaned_page_title(&ctx.page_title));
    }

    let job_title = clean_text(draft.job_title.as_deref().unwrap_or(""));
    let company_name = clean_text(draft.company_name.as_deref().unwrap_or(""));
    let success = !job_title.is_empty() || !company_name.is_empty();

    ExtractionResult {
        job_title,
        company_name,
        success,
        error: None,
    }
}

// "Title at Company", "Title - Company", "Title | Company"; tried in
// order against og:title, else the page title.
static GENERIC_TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(.+?)\s+(?:at|@)\s+(.+?)(?:\s*\||\s*-|$)",
        r"(?i)^(.+?)\s*-\s*(.+?)(?:\s*\||\s*-|$)",
        r"(?i)^(.+?)\s*\|\s*(.+?)(?:\s*\||\s*-|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

fn generic_title_patterns(ctx: &PageContext) -> Draft {
    let source = ctx.best_title();
    if source.is_empty() {
        return Draft::default();
    }

    for re in GENERIC_TITLE_PATTERNS.iter() {
        if let Some(caps) = re.captures(source) {
            let job_title = caps
                .get(1)
                .and_then(|m| non_empty(m.as_str().trim().to_string()));
            if job_title.is_none() {
                continue;
            }
            let company_name = caps
                .get(2)
                .and_then(|m| non_empty(m.as_str().trim().to_string()));
            return Draft {
                job_title,
                company_name,
            };
        }
    }

    Draft::default()
}

static TITLE_PIPE_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|.*$").unwrap());

static TITLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*-\s*(?:Jobs?|Careers?|Apply|Hiring).*$").unwrap());

/// Residual job-title fallback: the page title with everything after a
/// `|` dropped and trailing "Jobs/Careers/Apply/Hiring" segments stripped.
fn cleaned_page_title(page_title: &str) -> String {
    let cleaned = TITLE_PIPE_TAIL_RE.replace(page_title, "");
    let cleaned = TITLE_SUFFIX_RE.replace(&cleaned, "");
    cleaned.trim().to_string()
}
