pub mod html;

pub use html::{html_response, html_with_status};
