//! API response helpers
//!
//! Success envelopes shared by the CRUD handlers: bare records and arrays for
//! reads, `{message, data}` for writes and `{message}` for deletes.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Write acknowledgement carrying the stored record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a 200 OK JSON response with the value as the body
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(data))
}

/// Create a 201 Created `{message, data}` response
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(DataResponse {
            message: message.into(),
            data,
        }),
    )
}

/// Create a 200 OK `{message, data}` response
pub fn updated<T: Serialize>(message: impl Into<String>, data: T) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(DataResponse {
            message: message.into(),
            data,
        }),
    )
}

/// Create a 200 OK `{message}` response
pub fn message(message: impl Into<String>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_response_shape() {
        let body = serde_json::to_value(DataResponse {
            message: "Defect created successfully".to_string(),
            data: serde_json::json!({"defect_id": "D-1"}),
        })
        .unwrap();
        assert_eq!(body["message"], "Defect created successfully");
        assert_eq!(body["data"]["defect_id"], "D-1");
    }
}
