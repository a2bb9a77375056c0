//! Thin authenticated JSON transport over the remote API.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::FetchError;

pub(crate) fn endpoint_url(base_url: &Url, path: &str) -> String {
    format!("{}/{path}", base_url.as_str().trim_end_matches('/'))
}

/// Issues one bearer-authenticated GET and parses the response into the
/// endpoint's schema. A 401 maps to [`FetchError::Unauthorized`] uniformly
/// for every endpoint; any other failure, including transport timeouts,
/// maps to [`FetchError::Unreachable`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    base_url: &Url,
    endpoint: &'static str,
    query: Option<(&str, &str)>,
    token: &str,
) -> Result<T, FetchError> {
    let mut request = http.get(endpoint_url(base_url, endpoint)).bearer_auth(token);
    if let Some((key, value)) = query {
        request = request.query(&[(key, value)]);
    }

    let response = request
        .send()
        .await
        .map_err(|err| FetchError::Unreachable(err.to_string()))?;

    match response.status() {
        StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
        status if !status.is_success() => {
            return Err(FetchError::Unreachable(format!(
                "{endpoint} returned {status}"
            )))
        }
        _ => {}
    }

    response
        .json::<T>()
        .await
        .map_err(|err| FetchError::InvalidResponse {
            endpoint,
            message: err.to_string(),
        })
}
