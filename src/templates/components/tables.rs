use crate::analysis::census::CensusTable;
use crate::domain::listing::{format_thousands, PriceSummaryRow};
use maud::{html, Markup};

pub fn summary_table(rows: &[PriceSummaryRow], per_area: bool) -> Markup {
    let fmt = |v: f64| {
        if per_area {
            format!("${v:.0}")
        } else {
            format_thousands(v)
        }
    };
    html! {
        table class="data" {
            thead {
                tr {
                    th { "Bedrooms" }
                    th { "Bathrooms" }
                    th { "min" }
                    th { "max" }
                    th { "median" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td { (row.bedrooms) }
                        td { (row.bathrooms) }
                        td { (fmt(row.min)) }
                        td { (fmt(row.max)) }
                        td { (fmt(row.median)) }
                    }
                }
            }
        }
        @if rows.is_empty() {
            p class="empty" { "No listings for this month yet." }
        }
    }
}

pub fn census_table(table: &CensusTable) -> Markup {
    html! {
        table class="data" {
            thead {
                tr {
                    th {}
                    @for loc in &table.locations {
                        th { (loc) }
                    }
                }
            }
            tbody {
                @for (fact, cells) in &table.rows {
                    tr {
                        th { (fact) }
                        @for cell in cells {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}
