use maud::{html, Markup};

/// Titled panel around a table or a chart.
pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            (body)
        }
    }
}
