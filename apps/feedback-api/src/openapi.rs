//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Feedback API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback API",
        version = "0.1.0",
        description = "Guest feedback intake with asynchronous embedding attachment",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/feedback", api = domain_feedback::ApiDoc)
    )
)]
pub struct ApiDoc;
