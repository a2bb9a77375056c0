use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the remote API attaches to rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized role '{0}'")]
pub struct UnknownRole(pub String);

#[derive(Debug, Error)]
#[error("unrecognized date range '{0}'")]
pub struct UnknownDateRange(pub String);
