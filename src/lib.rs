//! Best-effort job posting extraction from raw HTML.
//!
//! Given one fetched job-board page, pulls a job title and company name
//! without a DOM parser, using a prioritized chain of sources:
//! - OpenGraph meta tags and the page `<title>`
//! - Site-specific heuristics (LinkedIn, Indeed, Glassdoor, Greenhouse,
//!   Lever, dou.ua, work.ua)
//! - Generic "Title at Company" title patterns
//! - JSON-LD `JobPosting` (with `@graph` support)
//!
//! [`extract_job_info`] is the pure entry point; [`fetch::scrape_url`]
//! wraps it with a blocking browser-like GET for callers that start from
//! a URL.

pub mod extractors;
pub mod fetch;
pub mod text;

pub use extractors::*;
pub use fetch::*;
pub use text::*;
