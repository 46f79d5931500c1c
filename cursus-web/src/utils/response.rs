//! Standard API response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cursus_api_types::{pagination::PaginationMeta, ListResponse};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
///
/// List endpoints carry pagination metadata; `meta.pagination.total` is
/// the pre-pagination row count UIs use for page-count computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Response metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    /// Create a simple response with just data
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    /// Create response with pagination metadata
    pub fn with_pagination(data: T, pagination: PaginationMeta) -> Self {
        Self {
            data,
            meta: Some(ResponseMeta {
                pagination: Some(pagination),
            }),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Convert a repository page into the response envelope
impl<T: Serialize> From<ListResponse<T>> for ApiResponse<Vec<T>> {
    fn from(list_response: ListResponse<T>) -> Self {
        ApiResponse::with_pagination(list_response.items, list_response.meta)
    }
}

/// Create a successful response with data
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    Json(ApiResponse::new(data))
}

/// Create a created response (201)
pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(ApiResponse::new(data)))
}

/// Create a no content response (204)
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        id: u32,
    }

    #[test]
    fn test_plain_response_omits_meta() {
        let response = ApiResponse::new(TestData { id: 1 });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn test_list_response_carries_total() {
        let list = ListResponse::new(vec![TestData { id: 1 }], 1, 25, 51);
        let response: ApiResponse<Vec<TestData>> = list.into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["meta"]["pagination"]["total"], 51);
        assert_eq!(json["meta"]["pagination"]["limit"], 25);
    }
}
