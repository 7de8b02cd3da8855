use serde::{Deserialize, Serialize};

/// Body returned by every JSON endpoint.
///
/// `fetched` is false when a query was not run because its inputs were not
/// valid yet; `data` and `error` are both absent in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub fetched: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            fetched: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn not_fetched() -> Self {
        Self {
            success: true,
            fetched: false,
            data: None,
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            fetched: true,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
