//! Rendered error pages for the app-wide `ErrorHandlers` middleware.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderValue, CONTENT_TYPE};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result};
use askama::Template;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status_code: u16,
    message: &'a str,
}

fn render_error_page<B>(
    res: ServiceResponse<B>,
    message: &str,
) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let html = ErrorTemplate {
        status_code: status.as_u16(),
        message,
    }
    .render()
    .unwrap_or_else(|_| message.to_owned());

    let (req, _) = res.into_parts();
    let mut response = HttpResponse::build(status).body(html);
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

pub fn render_404<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    render_error_page(res, "The page you requested could not be found.")
}

pub fn render_500<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    render_error_page(res, "Something went wrong on our end.")
}
