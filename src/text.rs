//! Text normalization shared by the extractors.
//!
//! Everything pulled out of raw markup goes through [`decode_html_entities`]
//! before it participates in any pattern match, and through [`clean_text`]
//! before it is returned to the caller.

/// Decode the HTML entities that show up in page titles and meta content:
/// `&amp; &lt; &gt; &quot; &#39; &nbsp;` plus decimal (`&#NNN;`) and hex
/// (`&#xHHHH;`) character references. Unrecognized sequences pass through
/// unchanged.
pub fn decode_html_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entity names are short; a distant semicolon means a bare ampersand.
        match tail[1..].find(';').map(|p| p + 1) {
            Some(semi) if semi > 1 && semi <= 10 => {
                if let Some(decoded) = decode_entity(&tail[1..semi]) {
                    out.push(decoded);
                    rest = &tail[semi + 1..];
                    continue;
                }
                out.push('&');
                rest = &tail[1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse whitespace runs into single spaces, trim, and strip one layer
/// of wrapping single or double quotes.
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = collapsed.strip_prefix(['"', '\'']).unwrap_or(&collapsed);
    let stripped = stripped.strip_suffix(['"', '\'']).unwrap_or(stripped);
    stripped.trim().to_string()
}

/// Turn a URL slug like `nerdysoft-llc` into `Nerdysoft Llc`: hyphens become
/// spaces and the first letter of each word is uppercased. No other casing
/// changes are applied.
pub fn capitalize_words(slug: &str) -> String {
    let spaced = slug.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;

    for ch in spaced.chars() {
        if ch.is_whitespace() {
            out.push(ch);
            at_word_start = true;
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_html_entities("Q&amp;A Engineer"), "Q&A Engineer");
        assert_eq!(decode_html_entities("&lt;Senior&gt;"), "<Senior>");
        assert_eq!(decode_html_entities("&quot;Acme&quot;"), "\"Acme\"");
        assert_eq!(decode_html_entities("a&nbsp;b"), "a b");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("&#87;idget"), "Widget");
        assert_eq!(decode_html_entities("&#39;quoted&#39;"), "'quoted'");
        assert_eq!(decode_html_entities("&#x57;idget"), "Widget");
        assert_eq!(decode_html_entities("caf&#233;"), "café");
    }

    #[test]
    fn test_decode_leaves_unknown_sequences_alone() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_html_entities("a & b"), "a & b");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
        assert_eq!(decode_html_entities("&#xzz;"), "&#xzz;");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Senior \t Engineer \n "), "Senior Engineer");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_text_strips_one_quote_layer() {
        assert_eq!(clean_text("\"Acme Corp\""), "Acme Corp");
        assert_eq!(clean_text("'Acme Corp'"), "Acme Corp");
        assert_eq!(clean_text("\"\"Acme\"\""), "\"Acme\"");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("nerdysoft"), "Nerdysoft");
        assert_eq!(capitalize_words("nerdysoft-llc"), "Nerdysoft Llc");
        assert_eq!(capitalize_words("job-boards"), "Job Boards");
        assert_eq!(capitalize_words("aBC-deF"), "ABC DeF");
    }
}
