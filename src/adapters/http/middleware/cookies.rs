//! Session cookie extraction.
//!
//! Browser environments vary in whether the plain or the `__Secure-`
//! prefixed cookie is set, so both names are checked. An empty cookie
//! value is treated identically to a missing one.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Value of the named cookie, if present and non-empty.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if key.trim() == name {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Session token from the plain cookie, falling back to the secure variant.
pub(crate) fn session_token<'a>(
    headers: &'a HeaderMap,
    plain_name: &str,
    secure_name: &str,
) -> Option<&'a str> {
    cookie_value(headers, plain_name).or_else(|| cookie_value(headers, secure_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_named_cookie() {
        let headers = headers("theme=dark; session_token=abc123; lang=en");
        assert_eq!(cookie_value(&headers, "session_token"), Some("abc123"));
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = headers("theme=dark");
        assert_eq!(cookie_value(&headers, "session_token"), None);
    }

    #[test]
    fn empty_cookie_is_treated_as_missing() {
        let headers = headers("session_token=; theme=dark");
        assert_eq!(cookie_value(&headers, "session_token"), None);
    }

    #[test]
    fn no_cookie_header_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "session_token"), None);
    }

    #[test]
    fn session_token_prefers_plain_name() {
        let headers = headers("session_token=plain; __Secure-session_token=secure");
        assert_eq!(
            session_token(&headers, "session_token", "__Secure-session_token"),
            Some("plain")
        );
    }

    #[test]
    fn session_token_falls_back_to_secure_name() {
        let headers = headers("__Secure-session_token=secure");
        assert_eq!(
            session_token(&headers, "session_token", "__Secure-session_token"),
            Some("secure")
        );
    }

    #[test]
    fn empty_plain_cookie_falls_back_to_secure() {
        let headers = headers("session_token=; __Secure-session_token=secure");
        assert_eq!(
            session_token(&headers, "session_token", "__Secure-session_token"),
            Some("secure")
        );
    }
}
