//! URL validation

use reqwest::Url;

use crate::error::{FetchError, FetchResult};

/// Parse `raw` as an absolute `http`/`https` URL with a non-empty host
///
/// Pure parsing, no network access happens here.
pub fn validate_url(raw: &str) -> FetchResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FetchError::InvalidUrl("empty input".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(FetchError::InvalidUrl("missing host".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com/file.pdf").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("  https://cdn.example.com/a/b.zip?x=1  ").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/file.bin").is_ok());
        assert!(validate_url("http://localhost/file.bin").is_ok());
        assert!(validate_url("HTTPS://EXAMPLE.COM/FILE.PDF").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        for raw in [
            "ftp://example.com/file.bin",
            "file:///etc/passwd",
            "magnet:?xt=urn:btih:abc",
            "mailto:someone@example.com",
            "data:text/plain,hello",
        ] {
            match validate_url(raw) {
                Err(FetchError::InvalidUrl(_)) => {}
                other => panic!("expected InvalidUrl for {}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_rejects_non_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
        assert!(validate_url("hello there").is_err());
        assert!(validate_url("example.com/file.pdf").is_err());
        assert!(validate_url("/relative/path.zip").is_err());
        assert!(validate_url("http://").is_err());
        assert!(validate_url("please download https://example.com/a.zip").is_err());
    }
}
