// src/db/query_builder.rs

use crate::domain::filter::HousingFilter;

/// A SQL string plus its positional string parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// City predicate for the 1-city and 3-city map pages.
///
/// Any other count is a caller bug: it is logged and `None` is returned,
/// so every builder in this module returns `None` for it too.
pub fn city_clause(cities: &[&str]) -> Option<&'static str> {
    match cities.len() {
        1 => Some("city.city_name = ?"),
        3 => Some("city.city_name in (?, ?, ?)"),
        n => {
            log::error!("Numbers of cities passed is not correct: expected 1 or 3, got {n}");
            None
        }
    }
}

/// Extra `and ...` conditions for a filter. Values are typed integers, so they
/// are written straight into the SQL.
pub fn filter_clauses(filter: &HousingFilter) -> String {
    let mut sql = String::new();
    if let Some((lo, hi)) = filter.bedrooms {
        sql.push_str(&format!(" and num_bedroom between {lo} and {hi}"));
    }
    if let Some((lo, hi)) = filter.bathrooms {
        sql.push_str(&format!(" and num_bathroom between {lo} and {hi}"));
    }
    if let Some(days) = filter.max_days_posted {
        sql.push_str(&format!(" and num_days_posted <= {days}"));
    }
    sql
}

/// The price column, or price per square foot when the filter asks for it.
pub fn price_column(filter: &HousingFilter) -> &'static str {
    if filter.price_per_area {
        "case when area > 0 then price * 1.0 / area end"
    } else {
        "price"
    }
}

fn with_cities(cities: &[&str], tail: &[&str]) -> Vec<String> {
    cities
        .iter()
        .chain(tail.iter())
        .map(|s| s.to_string())
        .collect()
}

pub fn layout_query(landmark_type: &str, cities: &[&str]) -> Option<BuiltQuery> {
    let clause = city_clause(cities)?;
    let sql = format!(
        "select landmark_lng, landmark_lat, landmark_name \
         from city_layout join city on city_layout.city_id = city.id \
         where landmark_type = ? and {clause} \
         order by city_layout.id"
    );
    let mut params = vec![landmark_type.to_string()];
    params.extend(cities.iter().map(|s| s.to_string()));
    Some(BuiltQuery { sql, params })
}

pub fn housing_query(cities: &[&str], month: &str, filter: &HousingFilter) -> Option<BuiltQuery> {
    let clause = city_clause(cities)?;
    let sql = format!(
        "select zillow_url, house_lat, house_lng, {price} \
         from city_housing join city on city_housing.city_id = city.id \
         where {clause} and crawled_date = ?{filters} \
         order by city_housing.id",
        price = price_column(filter),
        filters = filter_clauses(filter),
    );
    Some(BuiltQuery {
        sql,
        params: with_cities(cities, &[month]),
    })
}

pub fn analysis_sql(cities: &[&str], month: &str, filter: &HousingFilter) -> Option<BuiltQuery> {
    let clause = city_clause(cities)?;
    let sql = format!(
        "select num_bathroom, num_bedroom, {price} \
         from city_housing join city on city_housing.city_id = city.id \
         where {clause} and crawled_date = ?{filters}",
        price = price_column(filter),
        filters = filter_clauses(filter),
    );
    Some(BuiltQuery {
        sql,
        params: with_cities(cities, &[month]),
    })
}

/// Two-bath, two-or-three-bed listings up to and including `end_month`.
pub fn monthly_price_sql(cities: &[&str], end_month: &str) -> Option<BuiltQuery> {
    let clause = city_clause(cities)?;
    let sql = format!(
        "select crawled_date, price \
         from city_housing join city on city_housing.city_id = city.id \
         where {clause} and crawled_date <= ? \
         and num_bathroom in (2) and num_bedroom in (2, 3) \
         order by crawled_date, city_housing.id"
    );
    Some(BuiltQuery {
        sql,
        params: with_cities(cities, &[end_month]),
    })
}
