use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    pub total: Option<usize>,
    /// False when the change could only be kept in memory.
    pub persisted: Option<bool>,
}

impl Meta {
    pub fn count(total: usize) -> Self {
        Self {
            total: Some(total),
            persisted: None,
        }
    }

    pub fn persisted(persisted: bool) -> Self {
        Self {
            total: None,
            persisted: Some(persisted),
        }
    }

    pub fn empty() -> Self {
        Self {
            total: None,
            persisted: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
