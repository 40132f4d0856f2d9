//! API URL construction shared by all providers.

use mediaembed_core::{CoreError, FetchParams, PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH, PARAM_URL};
use url::Url;

/// Builds an oEmbed request URL.
///
/// The resource URL is sent as `url`; `maxwidth` and `maxheight` are
/// forwarded when present. `extra` is appended as-is.
///
/// # Errors
///
/// Returns an error if the params lack a URL, carry a bad dimension, or the
/// endpoint itself is not a valid URL.
pub fn build_api_url(
    endpoint: &str,
    params: &FetchParams,
    extra: &[(&str, &str)],
) -> Result<String, CoreError> {
    let mut query: Vec<(&str, String)> = vec![(PARAM_URL, params.url()?.to_string())];

    for key in [PARAM_MAX_WIDTH, PARAM_MAX_HEIGHT] {
        if let Some(value) = params.dimension(key)? {
            query.push((key, value.to_string()));
        }
    }
    query.extend(extra.iter().map(|(k, v)| (*k, (*v).to_string())));

    let url = Url::parse_with_params(endpoint, &query)
        .map_err(|e| CoreError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}")))?;
    Ok(url.into())
}

/// Checks that an endpoint is an absolute http(s) URL.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfig`] otherwise.
pub fn validate_endpoint(endpoint: &str) -> Result<(), CoreError> {
    let url = Url::parse(endpoint)
        .map_err(|e| CoreError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported endpoint scheme: {other}"
        ))),
    }
}
