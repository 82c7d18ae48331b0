use serde::Serialize;
use utoipa::ToSchema;

/// Plain confirmation body, used where an endpoint has nothing else to return.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
