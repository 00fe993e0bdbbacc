use crate::domain::city::LOCATIONS;
use maud::{html, Markup, DOCTYPE};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.18.2.min.js";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
                script src=(PLOTLY_JS) {};
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  h3 { "Housing Map" }
                  nav {
                      ul {
                          @for loc in LOCATIONS {
                              li { a href=(format!("/{}", loc.slug)) { (loc.title) } }
                          }
                          li { a href="/city-stats" { "City stats" } }
                      }
                  }
              }
                (content)
            }
        }
    }
}
