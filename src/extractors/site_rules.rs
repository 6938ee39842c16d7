//! Site-specific heuristics for known job boards.
//!
//! Each rule pairs a hostname substring with an ordered tactic list. The
//! first rule whose substring matches the hostname runs alone; its tactics
//! execute in order until both fields are filled or the list is exhausted.
//! Adding a board means adding a rule entry and its tactics, not touching
//! the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{non_empty, Draft, PageContext};
use crate::text::{capitalize_words, decode_html_entities};

type Tactic = fn(&PageContext) -> Draft;

struct SiteRule {
    /// Substring test, so subdomains match ("jobs.lever.co" hits "lever.co").
    host: &'static str,
    tactics: &'static [Tactic],
}

const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        host: "dou.ua",
        tactics: &[
            dou_company_from_url,
            dou_title_from_h1,
            dou_company_from_anchor,
            dou_split_og_title,
        ],
    },
    SiteRule {
        host: "work.ua",
        tactics: &[
            work_title_from_h1,
            work_company_from_anchor,
            work_company_from_text,
            work_title_from_og,
        ],
    },
    SiteRule {
        host: "linkedin.com",
        tactics: &[linkedin_hiring_title, linkedin_title_at_company],
    },
    SiteRule {
        host: "indeed.com",
        tactics: &[indeed_title],
    },
    SiteRule {
        host: "glassdoor.com",
        tactics: &[glassdoor_title],
    },
    SiteRule {
        host: "greenhouse.io",
        tactics: &[
            greenhouse_title,
            greenhouse_og_title,
            greenhouse_company_from_url,
        ],
    },
    SiteRule {
        host: "lever.co",
        tactics: &[lever_split_title, lever_company_from_url],
    },
];

/// Run the first rule matching the hostname. Fields already filled by an
/// earlier tactic are never overwritten.
pub(crate) fn apply_site_rules(ctx: &PageContext) -> Draft {
    let mut draft = Draft::default();

    if let Some(rule) = SITE_RULES.iter().find(|rule| ctx.hostname.contains(rule.host)) {
        debug!(host = rule.host, "site rule matched");
        for tactic in rule.tactics {
            draft = draft.or(tactic(ctx));
            if draft.is_complete() {
                break;
            }
        }
    }

    draft
}

// ---- dou.ua ----------------------------------------------------------------

static DOU_COMPANY_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/companies/([^/]+)/").unwrap());

static DOU_H1_VACANCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<h1[^>]*class="[^"]*vacancy[^"]*"[^>]*>([^<]+)</h1>"#).unwrap()
});

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap());

static DOU_COMPANY_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a[^>]*class="[^"]*company[^"]*"[^>]*>([^<]+)</a>"#).unwrap()
});

static DASH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*[—–-]\s*(.+?)$").unwrap());

/// Company slug from a path like `/companies/nerdysoft/`, word-capitalized.
fn dou_company_from_url(ctx: &PageContext) -> Draft {
    let company = ctx.url.and_then(|url| {
        DOU_COMPANY_URL_RE
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|slug| non_empty(capitalize_words(slug.as_str())))
    });
    Draft::company(company)
}

/// `<h1>` carrying a "vacancy" class, else the first `<h1>`.
fn dou_title_from_h1(ctx: &PageContext) -> Draft {
    Draft::title(capture_text(&DOU_H1_VACANCY_RE, ctx.html).or_else(|| capture_text(&H1_RE, ctx.html)))
}

fn dou_company_from_anchor(ctx: &PageContext) -> Draft {
    Draft::company(capture_text(&DOU_COMPANY_LINK_RE, ctx.html))
}

/// og:title shaped like `Job Title — Company`.
fn dou_split_og_title(ctx: &PageContext) -> Draft {
    if ctx.og_title.is_empty() {
        return Draft::default();
    }
    title_then_company(&DASH_SPLIT_RE, &ctx.og_title)
}

// ---- work.ua ---------------------------------------------------------------

static WORK_H1_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<h1[^>]*id="h1-name"[^>]*>([^<]+)</h1>"#).unwrap());

static WORK_COMPANY_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a[^>]*href="/jobs/by-company/[^"]*"[^>]*>([^<]+)</a>"#).unwrap()
});

static WORK_COMPANY_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)компанія\s+([A-Za-zА-Яа-яІіЇїЄєҐґ0-9_-]+)").unwrap());

static WORK_VACANCY_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Вакансія:\s*").unwrap());

static WORK_TITLE_TAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[—–-]\s*(?:вакансія|робота|vacancy|job|Work\.ua).*$").unwrap()
});

static WORK_TITLE_CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*,\s*(?:\d|робота|компанія).*$").unwrap());

/// `<h1 id="h1-name">` else the first `<h1>`, with the localized
/// "Вакансія:" prefix stripped.
fn work_title_from_h1(ctx: &PageContext) -> Draft {
    let title = capture_text(&WORK_H1_NAME_RE, ctx.html)
        .or_else(|| capture_text(&H1_RE, ctx.html))
        .map(|title| WORK_VACANCY_PREFIX_RE.replace(&title, "").into_owned())
        .and_then(non_empty);
    Draft::title(title)
}

fn work_company_from_anchor(ctx: &PageContext) -> Draft {
    Draft::company(capture_text(&WORK_COMPANY_LINK_RE, ctx.html))
}

/// Raw-text `компанія <name>` mention, a last resort for pages without a
/// company link.
fn work_company_from_text(ctx: &PageContext) -> Draft {
    let company = WORK_COMPANY_TEXT_RE
        .captures(ctx.html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str().trim().to_string()));
    Draft::company(company)
}

/// og:title with the prefix and trailing salary/location clauses stripped.
/// Titles that start with a digit are salary fragments, not job titles.
fn work_title_from_og(ctx: &PageContext) -> Draft {
    if ctx.og_title.is_empty() {
        return Draft::default();
    }
    let title = WORK_VACANCY_PREFIX_RE.replace(&ctx.og_title, "");
    let title = WORK_TITLE_TAIL_RE.replace(&title, "");
    let title = WORK_TITLE_CLAUSE_RE.replace(&title, "");
    let title = title.trim();
    if title.starts_with(|c: char| c.is_ascii_digit()) {
        return Draft::default();
    }
    Draft::title(non_empty(title.to_string()))
}

// ---- linkedin.com ----------------------------------------------------------

static LINKEDIN_HIRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s+hiring\s+(.+?)\s+in\s+.+?\s*\|\s*LinkedIn$").unwrap());

static LINKEDIN_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(?:at|@|-)\s+(.+?)(?:\s*\||\s*-|\s*·|$)").unwrap()
});

/// `{Company} hiring {Title} in {Location} | LinkedIn`.
fn linkedin_hiring_title(ctx: &PageContext) -> Draft {
    company_then_title(&LINKEDIN_HIRING_RE, ctx.best_title())
}

/// `{Title} at/@/- {Company}` terminated by `|`, `-` or a mid-dot.
fn linkedin_title_at_company(ctx: &PageContext) -> Draft {
    title_then_company(&LINKEDIN_AT_RE, ctx.best_title())
}

// ---- indeed.com ------------------------------------------------------------

static INDEED_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s*-\s*(.+?)\s*-\s*Indeed").unwrap());

fn indeed_title(ctx: &PageContext) -> Draft {
    title_then_company(&INDEED_TITLE_RE, &ctx.page_title)
}

// ---- glassdoor.com ---------------------------------------------------------

static GLASSDOOR_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s+job\s+(?:in|at)\s+.+?\s*\|\s*(.+?)\s*\|").unwrap());

fn glassdoor_title(ctx: &PageContext) -> Draft {
    title_then_company(&GLASSDOOR_TITLE_RE, &ctx.page_title)
}

// ---- greenhouse.io ---------------------------------------------------------

static GREENHOUSE_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Job Application for\s+(.+?)\s+at\s+(.+?)\s*$").unwrap());

static GREENHOUSE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)greenhouse\.io/([^/]+)/jobs").unwrap());

/// Page title shaped like `Job Application for {Title} at {Company}`.
fn greenhouse_title(ctx: &PageContext) -> Draft {
    title_then_company(&GREENHOUSE_TITLE_RE, &ctx.page_title)
}

/// Greenhouse og:title usually carries the bare job title.
fn greenhouse_og_title(ctx: &PageContext) -> Draft {
    Draft::title(non_empty(ctx.og_title.trim().to_string()))
}

/// Company slug from a path like `greenhouse.io/alpaca/jobs/123`.
fn greenhouse_company_from_url(ctx: &PageContext) -> Draft {
    let company = ctx.url.and_then(|url| {
        GREENHOUSE_URL_RE
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|slug| non_empty(capitalize_words(slug.as_str())))
    });
    Draft::company(company)
}

// ---- lever.co --------------------------------------------------------------

static LEVER_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+-\s+(.+?)$").unwrap());

static LEVER_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)lever\.co/([^/]+)/").unwrap());

/// Lever titles are `{Company} - {Title}` — company first, reversed from
/// the generic dash pattern.
fn lever_split_title(ctx: &PageContext) -> Draft {
    company_then_title(&LEVER_SPLIT_RE, ctx.best_title())
}

/// Company slug from a path like `lever.co/nekohealth/...`, used only when
/// the title split left the company empty.
fn lever_company_from_url(ctx: &PageContext) -> Draft {
    let company = ctx.url.and_then(|url| {
        LEVER_URL_RE
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|slug| non_empty(capitalize_words(slug.as_str())))
    });
    Draft::company(company)
}

// ---- shared helpers --------------------------------------------------------

/// First capture group of `re` in raw markup, entity-decoded and trimmed.
fn capture_text(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(decode_html_entities(m.as_str().trim())))
}

/// Two-group pattern where group 1 is the job title and group 2 the company.
fn title_then_company(re: &Regex, source: &str) -> Draft {
    match re.captures(source) {
        Some(caps) => Draft {
            job_title: caps
                .get(1)
                .and_then(|m| non_empty(m.as_str().trim().to_string())),
            company_name: caps
                .get(2)
                .and_then(|m| non_empty(m.as_str().trim().to_string())),
        },
        None => Draft::default(),
    }
}

/// Two-group pattern where group 1 is the company and group 2 the job title.
fn company_then_title(re: &Regex, source: &str) -> Draft {
    match re.captures(source) {
        Some(caps) => Draft {
            job_title: caps
                .get(2)
                .and_then(|m| non_empty(m.as_str().trim().to_string())),
            company_name: caps
                .get(1)
                .and_then(|m| non_empty(m.as_str().trim().to_string())),
        },
        None => Draft::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        html: &'a str,
        hostname: &'a str,
        url: Option<&'a str>,
        og_title: &str,
        page_title: &str,
    ) -> PageContext<'a> {
        PageContext {
            html,
            hostname,
            url,
            og_title: og_title.to_string(),
            og_site_name: String::new(),
            page_title: page_title.to_string(),
        }
    }

    #[test]
    fn test_unknown_hostname_yields_nothing() {
        let page = ctx("<h1>Whatever</h1>", "example.com", None, "", "");
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title, None);
        assert_eq!(draft.company_name, None);
    }

    #[test]
    fn test_dou_company_from_url_and_title_from_h1() {
        let html = r#"<h1 class="g-h2 vacancy-title">Senior Rust Developer</h1>"#;
        let page = ctx(
            html,
            "jobs.dou.ua",
            Some("https://jobs.dou.ua/companies/nerdysoft/vacancies/123/"),
            "",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Senior Rust Developer"));
        assert_eq!(draft.company_name.as_deref(), Some("Nerdysoft"));
    }

    #[test]
    fn test_dou_og_title_dash_split() {
        let page = ctx(
            "",
            "jobs.dou.ua",
            None,
            "Python Developer — Datrics",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Python Developer"));
        assert_eq!(draft.company_name.as_deref(), Some("Datrics"));
    }

    #[test]
    fn test_work_ua_h1_and_company_anchor() {
        let html = r#"
            <h1 id="h1-name">Вакансія: Менеджер з продажу</h1>
            <a href="/jobs/by-company/123/" class="inline">ТОВ Ромашка</a>
        "#;
        let page = ctx(html, "www.work.ua", None, "", "");
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Менеджер з продажу"));
        assert_eq!(draft.company_name.as_deref(), Some("ТОВ Ромашка"));
    }

    #[test]
    fn test_work_ua_og_title_rejects_salary_fragment() {
        let page = ctx("", "work.ua", None, "5000 грн, робота в Києві", "");
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title, None);
    }

    #[test]
    fn test_linkedin_hiring_pattern() {
        let page = ctx(
            "",
            "www.linkedin.com",
            None,
            "Intellias hiring Senior AQA Engineer (JS, Cypress) in Ukraine | LinkedIn",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(
            draft.job_title.as_deref(),
            Some("Senior AQA Engineer (JS, Cypress)")
        );
        assert_eq!(draft.company_name.as_deref(), Some("Intellias"));
    }

    #[test]
    fn test_linkedin_title_at_company_fallback() {
        let page = ctx(
            "",
            "linkedin.com",
            None,
            "Staff Engineer at Initech | LinkedIn",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Staff Engineer"));
        assert_eq!(draft.company_name.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_indeed_page_title() {
        let page = ctx(
            "",
            "www.indeed.com",
            None,
            "",
            "Software Engineer - Acme Corp - Indeed.com",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Software Engineer"));
        assert_eq!(draft.company_name.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_glassdoor_page_title() {
        let page = ctx(
            "",
            "www.glassdoor.com",
            None,
            "",
            "Senior Developer Job in New York, NY | Acme Inc | Glassdoor",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Senior Developer"));
        assert_eq!(draft.company_name.as_deref(), Some("Acme Inc"));
    }

    #[test]
    fn test_greenhouse_page_title() {
        let page = ctx(
            "",
            "boards.greenhouse.io",
            None,
            "",
            "Job Application for Data Platform Engineer at Alpaca",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Data Platform Engineer"));
        assert_eq!(draft.company_name.as_deref(), Some("Alpaca"));
    }

    #[test]
    fn test_greenhouse_company_slug_fallback() {
        let page = ctx(
            "",
            "job-boards.greenhouse.io",
            Some("https://job-boards.greenhouse.io/alpaca/jobs/123"),
            "",
            "Careers",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.company_name.as_deref(), Some("Alpaca"));
    }

    #[test]
    fn test_lever_company_comes_first() {
        let page = ctx(
            "",
            "jobs.lever.co",
            None,
            "Nekohealth - Senior Backend Engineer",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Senior Backend Engineer"));
        assert_eq!(draft.company_name.as_deref(), Some("Nekohealth"));
    }

    #[test]
    fn test_lever_company_slug_when_title_is_bare() {
        let page = ctx(
            "",
            "jobs.lever.co",
            Some("https://jobs.lever.co/nekohealth/83a9e90b"),
            "Senior Backend Engineer",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.company_name.as_deref(), Some("Nekohealth"));
    }

    #[test]
    fn test_only_first_matching_rule_fires() {
        // A hostname matching two rule keys runs only the first entry.
        let page = ctx(
            "",
            "linkedin.com.indeed.com",
            None,
            "Engineer at Acme",
            "",
        );
        let draft = apply_site_rules(&page);
        assert_eq!(draft.job_title.as_deref(), Some("Engineer"));
        assert_eq!(draft.company_name.as_deref(), Some("Acme"));
    }
}
