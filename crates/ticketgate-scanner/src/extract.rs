use reqwest::Url;

use crate::error::ExtractError;

/// Derive a reference id from decoded QR text.
///
/// Payloads starting with `http` must be absolute URLs; their last non-empty
/// path segment is the id. Anything else is taken verbatim. No trimming is
/// applied, since the verifier matches ids exactly.
pub fn extract_reference_id(payload: &str) -> Result<String, ExtractError> {
    if payload.is_empty() {
        return Err(ExtractError::Empty);
    }

    if !payload.starts_with("http") {
        return Ok(payload.to_string());
    }

    let url = Url::parse(payload).map_err(|e| ExtractError::MalformedUrl(e.to_string()))?;
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or(ExtractError::NoPathSegment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_link() {
        assert_eq!(
            extract_reference_id("https://example.com/registration/4234567890").unwrap(),
            "4234567890"
        );
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(extract_reference_id("4234567890").unwrap(), "4234567890");
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(extract_reference_id(""), Err(ExtractError::Empty));
    }

    #[test]
    fn test_trailing_slash_uses_last_non_empty_segment() {
        assert_eq!(
            extract_reference_id("https://example.com/registration/4234567890/").unwrap(),
            "4234567890"
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            extract_reference_id("http://example.com/r/77?src=qr#top").unwrap(),
            "77"
        );
    }

    #[test]
    fn test_malformed_http_payload() {
        assert!(matches!(
            extract_reference_id("http//broken"),
            Err(ExtractError::MalformedUrl(_))
        ));
        assert!(matches!(
            extract_reference_id("https://"),
            Err(ExtractError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_url_without_path() {
        assert_eq!(
            extract_reference_id("https://example.com/"),
            Err(ExtractError::NoPathSegment)
        );
        assert_eq!(
            extract_reference_id("https://example.com"),
            Err(ExtractError::NoPathSegment)
        );
    }

    #[test]
    fn test_non_http_text_taken_verbatim() {
        assert_eq!(
            extract_reference_id("ftp://example.com/a/b").unwrap(),
            "ftp://example.com/a/b"
        );
        assert_eq!(extract_reference_id(" 42 ").unwrap(), " 42 ");
    }
}
