use crate::domain::city::Location;
use crate::domain::listing::PriceSummaryRow;
use crate::figures::Figure;
use crate::templates::components::{card, plot, summary_table};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct MapVm<'a> {
    pub location: &'a Location,
    pub month: String,
    pub listing_count: usize,
    pub price_map: Figure,
    pub monthly_prices: Figure,
    pub summary: Vec<PriceSummaryRow>,
}

pub fn map_page(vm: &MapVm) -> Markup {
    desktop_layout(
        vm.location.title,
        html! {
            main class="container" {
                h1 { (vm.location.title) " · " (vm.month) }
                p {
                    (vm.listing_count) " listings. "
                    a href=(format!("/{}/customize?month={}", vm.location.slug, vm.month)) { "Filter listings" }
                    " · "
                    a href=(format!("/{}/graph?month={}", vm.location.slug, vm.month)) { "Price clusters" }
                }

                (plot("price-map", &vm.price_map))
                (plot("monthly-prices", &vm.monthly_prices))

                (card("Price by bedrooms and bathrooms", summary_table(&vm.summary, false)))
            }
        },
    )
}
