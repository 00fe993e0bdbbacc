use crate::errors::ServerError;
use crate::responses::html_with_status;
use astra::{Body, Response};
use maud::{html, DOCTYPE};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        log::error!("request failed: {err}");
    } else {
        log::info!("request rejected: {err}");
    }

    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        other => other.to_string(),
    };
    render_error(status, &message)
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }
                     h1 { font-size: 2rem; margin-bottom: 1rem; }
                     p { font-size: 1.1rem; color: #444; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to the map" } }
            }
        }
    };

    html_with_status(status, page)
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
