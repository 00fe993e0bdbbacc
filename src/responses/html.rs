use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use maud::Markup;

/// 200 page.
pub fn html_response(markup: Markup) -> ResultResp {
    html_with_status(200, markup)
}

/// Rendered page with an explicit status. Pages follow the current crawl
/// month, so they are never cached.
pub fn html_with_status(status: u16, markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Cache-Control", "no-store")
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
