use crate::domain::city::Location;
use crate::domain::filter::HousingFilter;
use crate::domain::listing::PriceSummaryRow;
use crate::figures::Figure;
use crate::templates::components::{card, filter_form, plot, summary_table};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct CustomizeVm<'a> {
    pub location: &'a Location,
    pub month: String,
    pub filter: HousingFilter,
    pub listing_count: usize,
    pub listing_map: Figure,
    pub summary: Vec<PriceSummaryRow>,
}

pub fn customize_page(vm: &CustomizeVm) -> Markup {
    let action = format!("/{}/customize", vm.location.slug);
    let graph_href = if vm.filter.is_empty() {
        format!("/{}/graph?month={}", vm.location.slug, vm.month)
    } else {
        format!("/{}/graph?month={}&{}", vm.location.slug, vm.month, vm.filter.to_query())
    };

    desktop_layout(
        &format!("{} · customize", vm.location.title),
        html! {
            main class="container" {
                h1 { (vm.location.title) " · " (vm.month) }
                (filter_form(&action, &vm.month, &vm.filter))
                p {
                    (vm.listing_count) " matching listings. "
                    a href=(graph_href) { "Cluster these listings" }
                }

                (plot("listing-map", &vm.listing_map))

                (card(
                    &format!("{} by bedrooms and bathrooms", vm.filter.price_label()),
                    summary_table(&vm.summary, vm.filter.price_per_area),
                ))
            }
        },
    )
}
