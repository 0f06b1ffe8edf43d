use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid color code: {0}")]
    InvalidColor(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::services::mosaic_pipeline::PipelineError> for ApiError {
    fn from(e: crate::services::mosaic_pipeline::PipelineError) -> Self {
        use crate::services::mosaic_pipeline::PipelineError;
        match e {
            PipelineError::Decode(_) | PipelineError::InvalidInput(_) => {
                ApiError::InvalidImage(e.to_string())
            }
            PipelineError::Render(e) => ApiError::Render(e),
            PipelineError::Task(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Image is smaller than one tile; the mosaic is empty")]
    EmptyMosaic,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidColor(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidImage(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Render(RenderError::UnsupportedDimensions { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Render(RenderError::EmptyMosaic) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mosaic_pipeline::PipelineError;

    #[test]
    fn test_api_error_invalid_color() {
        let error = ApiError::InvalidColor("zz0000".to_string());
        assert_eq!(error.to_string(), "Invalid color code: zz0000");
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("join failed".to_string());
        assert_eq!(error.to_string(), "Internal error: join failed");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 9999,
            height: 0,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 9999x0");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_api_error_from_pipeline_error() {
        let api_error: ApiError = PipelineError::Decode("bad magic".to_string()).into();
        assert!(matches!(api_error, ApiError::InvalidImage(_)));

        let api_error: ApiError = PipelineError::Render(RenderError::EmptyMosaic).into();
        assert!(matches!(api_error, ApiError::Render(RenderError::EmptyMosaic)));

        let api_error: ApiError = PipelineError::Task("cancelled".to_string()).into();
        assert!(matches!(api_error, ApiError::Internal(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        // InvalidColor -> BAD_REQUEST
        let response = ApiError::InvalidColor("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // InvalidImage -> BAD_REQUEST
        let response = ApiError::InvalidImage("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // UnsupportedDimensions -> BAD_REQUEST
        let response = ApiError::Render(RenderError::UnsupportedDimensions {
            width: 0,
            height: 0,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // EmptyMosaic -> UNPROCESSABLE_ENTITY
        let response = ApiError::Render(RenderError::EmptyMosaic).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // PngEncode -> INTERNAL_SERVER_ERROR
        let response =
            ApiError::Render(RenderError::PngEncode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Internal -> INTERNAL_SERVER_ERROR
        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
