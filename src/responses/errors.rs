use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a response, as an HTML page or a JSON body.
pub fn error_response(err: &ServerError, as_html: bool) -> Response {
    let status = err.status_code();
    let message = match err {
        // Internal details stay in the log.
        ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".to_string(),
        other => other.to_string(),
    };

    if status >= 500 {
        tracing::error!(status, error = %err, "Request failed");
    } else {
        tracing::debug!(status, error = %err, "Request rejected");
    }

    let (content_type, body) = if as_html {
        (
            mime::TEXT_HTML_UTF_8,
            error_page(status, &message).into_string(),
        )
    } else {
        (
            mime::APPLICATION_JSON,
            json!({ "status": status, "error": message }).to_string(),
        )
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
