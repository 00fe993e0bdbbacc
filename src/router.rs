use crate::domain::city::DEFAULT_LOCATION;
use crate::errors::{ResultResp, ServerError};
use crate::responses::html_response;
use crate::views::{self, AppState};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    if method != "GET" && method != "POST" {
        return Err(ServerError::BadRequest(format!("{method} is not supported")));
    }

    let path = req.uri().path().to_string();
    let params = request_params(&mut req, &method)?;
    log::debug!("{method} {path} {params:?}");

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => html_response(views::city_map(state, DEFAULT_LOCATION, &params)?),
        ["city-stats"] => html_response(views::city_stats(state)?),
        [location] => html_response(views::city_map(state, location, &params)?),
        [location, "customize"] => html_response(views::customize(state, location, &params)?),
        [location, "graph"] => html_response(views::graph(state, location, &params)?),
        _ => Err(ServerError::NotFound),
    }
}

/// Query string parameters, plus the urlencoded form body of a POST.
/// Body fields win over query fields with the same name.
fn request_params(req: &mut Request, method: &str) -> Result<HashMap<String, String>, ServerError> {
    let mut map = parse_query(req.uri().query().unwrap_or(""));

    if method == "POST" {
        let mut body = String::new();
        req.body_mut()
            .reader()
            .read_to_string(&mut body)
            .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
        map.extend(parse_query(&body));
    }
    Ok(map)
}

fn parse_query(q: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(q.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
