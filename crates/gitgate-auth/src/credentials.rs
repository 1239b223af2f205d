//! Basic-credential extraction from request headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::{header, HeaderMap};

/// Username/password pair decoded from a `Basic` Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username before the first colon.
    pub username: String,
    /// Everything after the first colon.
    pub password: String,
}

/// Decodes `Authorization: Basic <base64>` from the header set.
///
/// Returns `None` when the header is absent, uses another scheme, or does
/// not decode to `username:password`.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.trim().strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_parse_basic() {
        // "alice:secret" in base64
        let headers = headers_with_auth("Basic YWxpY2U6c2VjcmV0");
        let creds = parse_basic_credentials(&headers).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_password_may_contain_colons() {
        // "bob:pa:ss" in base64
        let headers = headers_with_auth("Basic Ym9iOnBhOnNz");
        let creds = parse_basic_credentials(&headers).unwrap();
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_absent_header() {
        assert!(parse_basic_credentials(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_other_scheme() {
        let headers = headers_with_auth("Bearer sometoken");
        assert!(parse_basic_credentials(&headers).is_none());
    }

    #[test]
    fn test_invalid_base64() {
        let headers = headers_with_auth("Basic not-base64!!!");
        assert!(parse_basic_credentials(&headers).is_none());
    }

    #[test]
    fn test_missing_colon() {
        // "nocred" in base64
        let headers = headers_with_auth("Basic bm9jcmVk");
        assert!(parse_basic_credentials(&headers).is_none());
    }
}
