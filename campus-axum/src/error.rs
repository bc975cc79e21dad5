use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::errors::CampusError;

#[derive(Debug)]
pub struct CampusAxumError(pub anyhow::Error);

impl From<anyhow::Error> for CampusAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<CampusError> for CampusAxumError {
    fn from(e: CampusError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for CampusAxumError {
    fn into_response(self) -> Response {
        // A CampusError anywhere in the context chain keeps its status and shape.
        if let Some(err) = self.0.chain().find_map(|e| e.downcast_ref::<CampusError>()) {
            return respond(err);
        }

        tracing::error!(error = %self.0, "unhandled error");
        respond(&CampusError::general_error(self.0.to_string()))
    }
}

fn respond(err: &CampusError) -> Response {
    let safe = err.sanitize_for_client();
    let status = StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(safe.to_json())).into_response()
}
