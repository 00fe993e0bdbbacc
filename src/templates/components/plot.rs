use crate::figures::Figure;
use maud::{html, Markup, PreEscaped};

/// A div plus the inline script that draws `figure` into it.
pub fn plot(id: &str, figure: &Figure) -> Markup {
    // Keep a `</script>` inside a string value from closing the tag.
    let json = figure.to_json().to_string().replace("</", "<\\/");
    html! {
        div id=(id) class="plot" {}
        script {
            (PreEscaped(format!(
                "(function() {{ var fig = {json}; Plotly.newPlot('{id}', fig.data, fig.layout); }})();"
            )))
        }
    }
}
