pub mod attendance;
pub mod employee;
pub mod shell;

use actix_web::{HttpResponse, error::ErrorInternalServerError, http::header};
use askama::Template;
use tracing::error;

/// Render a page as `text/html`. Template failures become a 500.
pub(crate) fn render<T: Template>(template: T) -> actix_web::Result<HttpResponse> {
    let body = template.render().map_err(|e| {
        error!(error = %e, "Failed to render page");
        ErrorInternalServerError("Failed to render page")
    })?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body))
}

/// Post/redirect/get after a successful mutation.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
