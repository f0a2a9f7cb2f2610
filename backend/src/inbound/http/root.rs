//! Service banner.
//!
//! ```text
//! GET /
//! ```

use actix_web::{HttpResponse, get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body carrying a single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Message text.
    #[schema(example = "SQL Connector is live.")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Report that the service is running.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tags = ["service"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("SQL Connector is live."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};

    #[actix_web::test]
    async fn root_reports_liveness_message() {
        let app = actix_test::init_service(App::new().service(root)).await;
        let body: MessageResponse =
            actix_test::call_and_read_body_json(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(body, MessageResponse::new("SQL Connector is live."));
    }
}
