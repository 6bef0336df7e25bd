use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// `{"code": <status>, "msg": <message>}` with the matching HTTP status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "code": status.as_u16(),
            "msg": message.into(),
        })),
    )
        .into_response()
}
