use crate::domain::filter::HousingFilter;
use maud::{html, Markup};

fn bound(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// Open-ended sides of a range render as blank inputs.
fn range_bounds(range: Option<(u32, u32)>) -> (String, String) {
    match range {
        Some((lo, hi)) => (
            if lo == 0 { String::new() } else { lo.to_string() },
            if hi == u32::MAX { String::new() } else { hi.to_string() },
        ),
        None => (String::new(), String::new()),
    }
}

pub fn filter_form(action: &str, month: &str, filter: &HousingFilter) -> Markup {
    let (min_beds, max_beds) = range_bounds(filter.bedrooms);
    let (min_baths, max_baths) = range_bounds(filter.bathrooms);
    html! {
        form action=(action) method="get" class="filters" {
            input type="hidden" name="month" value=(month);
            fieldset {
                legend { "Bedrooms" }
                input type="number" min="0" name="min_bedrooms" placeholder="min" value=(min_beds);
                input type="number" min="0" name="max_bedrooms" placeholder="max" value=(max_beds);
            }
            fieldset {
                legend { "Bathrooms" }
                input type="number" min="0" name="min_bathrooms" placeholder="min" value=(min_baths);
                input type="number" min="0" name="max_bathrooms" placeholder="max" value=(max_baths);
            }
            label {
                "Posted within "
                input type="number" min="0" name="max_days" value=(bound(filter.max_days_posted));
                " days"
            }
            label {
                input type="checkbox" name="price_per_area" checked[filter.price_per_area];
                " Price per sqft"
            }
            button type="submit" { "Apply" }
        }
    }
}
