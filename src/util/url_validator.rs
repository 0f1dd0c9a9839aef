use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The URL carries a query or fragment where only a base path makes sense.
    #[error("Base URL must not contain a query or fragment")]
    UnexpectedQuery,
}

fn parse_http(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url)
}

/// Validates the API base address and returns it without a trailing slash.
///
/// Unlike image URLs, localhost and private addresses are expected here: the
/// catalog API usually runs next to the admin client.
///
/// # Examples
///
/// ```
/// use catalog_admin::util::validate_base_url;
///
/// assert_eq!(
///     validate_base_url("http://127.0.0.1:8000/api/").unwrap(),
///     "http://127.0.0.1:8000/api"
/// );
/// assert!(validate_base_url("ftp://example.com").is_err());
/// ```
pub fn validate_base_url(url_str: &str) -> Result<String, UrlValidationError> {
    let url = parse_http(url_str)?;
    if url.query().is_some() || url.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedQuery);
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Validates an image URL typed into a form (the `type="url"` constraint).
pub fn validate_image_url(url_str: &str) -> Result<Url, UrlValidationError> {
    parse_http(url_str)
}

/// Validates a URL before handing it to the system browser.
///
/// Returns a user-facing message on rejection. Control characters are refused
/// outright since the string ends up on a command line.
pub fn validate_url_for_open(url_str: &str) -> Result<(), String> {
    if url_str.chars().any(char::is_control) {
        return Err("Refusing to open URL containing control characters".to_string());
    }
    parse_http(url_str)
        .map(|_| ())
        .map_err(|e| format!("Cannot open image URL: {}", e))
}
