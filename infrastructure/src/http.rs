//! Response handling shared by the JSON-over-HTTP service adapters.

use reqwest::StatusCode;
use scout_application::ServiceError;

/// Map a transport error, keeping timeouts distinguishable.
pub(crate) fn transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::ConnectionError(e.to_string())
    }
}

/// Turn a non-success response into a [`ServiceError`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ServiceError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
