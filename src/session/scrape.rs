//! Scraping helpers for values the site only exposes inside pages and headers
//!
//! These patterns track the site's markup and cookies and are expected to
//! break when the site changes; keep them here so the session logic does not
//! have to.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// `csrftoken=<value>` up to the first `;`, whitespace or backspace
static CSRF_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)csrftoken=(.*?)[\x08;\s]").expect("CSRF_TOKEN_RE should compile")
});

/// JSON object passed to the page bootstrap call `P.main.start({...});`
static APP_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)P\.main\.start\((\{.+?\})\);").expect("APP_JSON_RE should compile")
});

/// Find the CSRF token among `Set-Cookie` header values.
///
/// All values are joined with single spaces before matching, so a token at
/// the very end of the last cookie (no terminator) is not found.
pub fn extract_csrf_token<'a, I>(set_cookies: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = set_cookies.into_iter().collect::<Vec<_>>().join(" ");
    CSRF_TOKEN_RE
        .captures(&joined)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extract the JSON object embedded in a page via `P.main.start(...)`.
///
/// A missing call, unparsable JSON or a non-object result all yield `None`.
pub fn extract_app_json(body: &str) -> Option<Map<String, Value>> {
    let captured = APP_JSON_RE.captures(body)?.get(1)?.as_str();
    match serde_json::from_str::<Value>(captured) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Embedded P.main.start() JSON failed to parse: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_csrf_token_from_single_cookie() {
        let token = extract_csrf_token(["csrftoken=abc123; expires=Thu; Path=/"]);
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_csrf_token_among_several_cookies() {
        let token = extract_csrf_token([
            "_pinterest_sess=xyz; Path=/; HttpOnly",
            "CSRFTOKEN=Tok-9; Path=/",
        ]);
        assert_eq!(token.as_deref(), Some("Tok-9"));
    }

    #[test]
    fn test_csrf_token_terminated_by_join_space() {
        let token = extract_csrf_token(["csrftoken=first", "other=1;"]);
        assert_eq!(token.as_deref(), Some("first"));
    }

    #[test]
    fn test_csrf_token_missing() {
        assert_eq!(extract_csrf_token(["sessionid=1; Path=/"]), None);
        assert_eq!(extract_csrf_token(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_csrf_token_without_terminator() {
        assert_eq!(extract_csrf_token(["csrftoken=dangling"]), None);
    }

    #[test]
    fn test_csrf_token_empty_value() {
        assert_eq!(extract_csrf_token(["csrftoken=; Path=/"]), None);
    }

    #[test]
    fn test_app_json_extracted() {
        let body = r#"<html><script>
            P.main.start({"context": {"app_version": "ab12cd"}});
            P.other();
        </script></html>"#;
        let map = extract_app_json(body).unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"context": {"app_version": "ab12cd"}})
        );
    }

    #[test]
    fn test_app_json_case_insensitive_multiline() {
        let body = "p.MAIN.start({\n\"a\": 1\n});";
        let map = extract_app_json(body).unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_app_json_missing() {
        assert!(extract_app_json("<html>no bootstrap here</html>").is_none());
    }

    #[test]
    fn test_app_json_malformed() {
        assert!(extract_app_json("P.main.start({broken: });").is_none());
    }
}
