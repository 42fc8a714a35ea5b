/* src/server/adapter/axum/src/error.rs */

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pagekit::PageError;

pub struct AxumError(pub PageError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": self.0.code(),
        "message": self.0.message(),
      }
    });
    (status, Json(body)).into_response()
  }
}

impl From<PageError> for AxumError {
  fn from(e: PageError) -> Self {
    Self(e)
  }
}
