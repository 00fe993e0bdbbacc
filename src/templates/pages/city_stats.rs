use crate::analysis::census::CensusTable;
use crate::templates::components::census_table;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn city_stats_page(table: &CensusTable) -> Markup {
    desktop_layout(
        "City stats",
        html! {
            main class="container" {
                h1 { "City stats" }
                p { "Source: U.S. Census Bureau QuickFacts." }
                (census_table(table))
            }
        },
    )
}
