use reqwest::Url;

use crate::errors::InvalidTargetUrl;

/// Accepts `http://` or `https://` followed by a non-empty remainder that
/// contains no whitespace and parses to a URL with a host.
pub fn validate_target_url(candidate: &str) -> Result<Url, InvalidTargetUrl> {
    let reject = |reason| InvalidTargetUrl {
        url: candidate.to_string(),
        reason,
    };

    let rest = candidate
        .strip_prefix("https://")
        .or_else(|| candidate.strip_prefix("http://"))
        .ok_or_else(|| reject("must start with http:// or https://"))?;

    if rest.is_empty() {
        return Err(reject("missing host"));
    }
    if candidate.chars().any(char::is_whitespace) {
        return Err(reject("contains whitespace"));
    }

    let url = Url::parse(candidate).map_err(|_| reject("not a parseable URL"))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(reject("missing host"));
    }
    Ok(url)
}
