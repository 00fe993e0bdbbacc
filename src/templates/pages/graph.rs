use crate::domain::city::Location;
use crate::domain::filter::HousingFilter;
use crate::figures::Figure;
use crate::templates::components::{filter_form, plot};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct GraphVm<'a> {
    pub location: &'a Location,
    pub month: String,
    pub filter: HousingFilter,
    pub point_count: usize,
    pub cluster_count: usize,
    pub cluster_map: Figure,
}

pub fn graph_page(vm: &GraphVm) -> Markup {
    let action = format!("/{}/graph", vm.location.slug);
    desktop_layout(
        &format!("{} · clusters", vm.location.title),
        html! {
            main class="container" {
                h1 { (vm.location.title) " price clusters · " (vm.month) }
                (filter_form(&action, &vm.month, &vm.filter))
                p { (vm.point_count) " listings in " (vm.cluster_count) " clusters." }
                (plot("cluster-map", &vm.cluster_map))
            }
        },
    )
}
