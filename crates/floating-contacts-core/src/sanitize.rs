//! Input sanitizers used by settings normalization.
//!
//! Each function is total: bad input degrades to a cleaned-up string or to
//! an empty string, never to an error.

use url::Url;

/// URL schemes a custom link may use. Anything else empties the URL.
const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Characters allowed in the local part of an email address.
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

const MAX_EMAIL_LEN: usize = 254;

/// Remove HTML-ish tags.
///
/// A `<` starts a tag only when followed by a letter, `/`, `!` or `?`; the tag
/// runs to the next `>` (or the end of input). A lone `<` as in `a < b` stays.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let opens_tag = c == '<'
            && chars
                .peek()
                .is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?'));
        if opens_tag {
            for skipped in chars.by_ref() {
                if skipped == '>' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Sanitize a single-line text value.
///
/// Strips tags, turns control characters (line breaks and tabs included) into
/// spaces, collapses whitespace runs and trims.
pub fn text_line(input: &str) -> String {
    strip_tags(input)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitize a multi-line text value.
///
/// Like [`text_line`] but line breaks survive; each line is cleaned on its own
/// and leading/trailing blank lines are dropped.
pub fn text_block(input: &str) -> String {
    let stripped = strip_tags(input).replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = stripped.split('\n').map(text_line).collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Return true if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => is_valid_local_part(local) && is_valid_domain(domain),
        None => false,
    }
}

/// Trim and validate an email address; invalid input becomes empty.
pub fn email(input: &str) -> String {
    let trimmed = input.trim();
    if is_valid_email(trimmed) {
        trimmed.to_string()
    } else {
        String::new()
    }
}

/// Sanitize a link target.
///
/// Whitespace and control characters are removed. A value with a scheme is
/// kept only if the scheme is allowed; a bare host/path gets `http://`
/// prepended; relative references starting with `/`, `#` or `?` pass through.
pub fn url(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    if cleaned.is_empty() {
        return cleaned;
    }

    match Url::parse(&cleaned) {
        Ok(parsed) if ALLOWED_SCHEMES.contains(&parsed.scheme()) => cleaned,
        Ok(parsed) => {
            tracing::debug!("Rejected URL with scheme '{}'", parsed.scheme());
            String::new()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if cleaned.starts_with(['/', '#', '?']) {
                cleaned
            } else {
                format!("http://{}", cleaned)
            }
        }
        Err(e) => {
            tracing::debug!("Rejected malformed URL '{}': {}", cleaned, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Call</b> us"), "Call us");
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("x<script>alert(1)"), "xalert(1)");
        assert_eq!(strip_tags("<!-- c -->ok"), "ok");
        assert_eq!(strip_tags("open <div"), "open ");
    }

    #[test]
    fn test_text_line_collapses_whitespace() {
        assert_eq!(text_line("  +1 555\t\n123  "), "+1 555 123");
        assert_eq!(text_line("a\u{0007}b"), "a b");
        assert_eq!(text_line(""), "");
    }

    #[test]
    fn test_text_block_keeps_newlines() {
        assert_eq!(
            text_block("\n Hello   there \r\n<i>How</i> are you?\n\n"),
            "Hello there\nHow are you?"
        );
        assert_eq!(text_block(" \n \n"), "");
    }

    #[test]
    fn test_email_valid() {
        assert_eq!(email(" hello@example.com "), "hello@example.com");
        assert_eq!(email("first.last+tag@mail.example.co"), "first.last+tag@mail.example.co");
    }

    #[test]
    fn test_email_invalid() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@-bad.com",
            "user@bad-.com",
            "us..er@example.com",
            ".user@example.com",
            "user name@example.com",
            "user@exa_mple.com",
            "a@b@c.com",
        ] {
            assert_eq!(email(bad), "", "expected '{}' to be rejected", bad);
        }
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(email(&long), "");
    }

    #[test]
    fn test_url_keeps_allowed_schemes() {
        assert_eq!(url("https://example.com/a?b=c"), "https://example.com/a?b=c");
        assert_eq!(url("mailto:sales@example.com"), "mailto:sales@example.com");
        assert_eq!(url("tel:+15551234567"), "tel:+15551234567");
    }

    #[test]
    fn test_url_prepends_http() {
        assert_eq!(url("example.com/contact"), "http://example.com/contact");
        assert_eq!(url("www.example.com/p?x=a:b"), "http://www.example.com/p?x=a:b");
    }

    #[test]
    fn test_url_relative_passthrough() {
        assert_eq!(url("/contact"), "/contact");
        assert_eq!(url("#footer"), "#footer");
        assert_eq!(url("?page=2"), "?page=2");
    }

    #[test]
    fn test_url_rejects_bad_schemes() {
        assert_eq!(url("javascript:alert(1)"), "");
        assert_eq!(url("JavaScript:alert(1)"), "");
        assert_eq!(url("data:text/html,hi"), "");
    }

    #[test]
    fn test_url_strips_whitespace() {
        assert_eq!(url("  https://exa mple.com/\n"), "https://example.com/");
        assert_eq!(url("   "), "");
    }
}
