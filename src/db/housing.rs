use crate::analysis::stats::remove_iqr_outliers;
use crate::db::query_builder::{analysis_sql, housing_query, monthly_price_sql, BuiltQuery};
use crate::domain::filter::HousingFilter;
use crate::domain::listing::{median, ListingPoints, MonthlyPrice, NewListing, PriceSummaryRow};
use crate::errors::ServerError;
use rusqlite::{params, params_from_iter, Connection};
use std::collections::BTreeMap;

/// Listing urls, coordinates and prices for one crawl month.
/// `None` when the city list breaks the 1-or-3 contract.
pub fn get_housing(
    conn: &Connection,
    cities: &[&str],
    month: &str,
    filter: &HousingFilter,
) -> Result<Option<ListingPoints>, ServerError> {
    let Some(BuiltQuery { sql, params }) = housing_query(cities, month, filter) else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<f64>>(1)?,
            row.get::<_, Option<f64>>(2)?,
            row.get::<_, Option<f64>>(3)?,
        ))
    })?;

    let mut out = ListingPoints::default();
    for r in rows {
        let (url, lat, lng, price) = r?;
        out.urls.push(url);
        out.lats.push(lat);
        out.lons.push(lng);
        out.prices.push(price);
    }
    log::debug!("{} listings for {:?} in {month}", out.len(), cities);
    Ok(Some(out))
}

/// Min / max / median price per (bedrooms, bathrooms) pair.
///
/// Rows missing any of the three values, or with zero bedrooms or bathrooms,
/// are left out. Fractional counts are truncated before grouping.
pub fn analysis_query(
    conn: &Connection,
    cities: &[&str],
    month: &str,
    filter: &HousingFilter,
) -> Result<Option<Vec<PriceSummaryRow>>, ServerError> {
    let Some(BuiltQuery { sql, params }) = analysis_sql(cities, month, filter) else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, Option<f64>>(0)?,
            row.get::<_, Option<f64>>(1)?,
            row.get::<_, Option<f64>>(2)?,
        ))
    })?;

    let mut groups: BTreeMap<(i64, i64), Vec<f64>> = BTreeMap::new();
    for r in rows {
        let (baths, beds, price) = r?;
        let (Some(baths), Some(beds), Some(price)) = (baths, beds, price) else {
            continue;
        };
        if baths <= 0.0 || beds <= 0.0 {
            continue;
        }
        groups
            .entry((beds.trunc() as i64, baths.trunc() as i64))
            .or_default()
            .push(price);
    }

    let summary = groups
        .into_iter()
        .filter_map(|((bedrooms, bathrooms), prices)| {
            let median = median(&prices)?;
            Some(PriceSummaryRow {
                bedrooms,
                bathrooms,
                min: prices.iter().copied().fold(f64::INFINITY, f64::min),
                max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                median,
            })
        })
        .collect();

    Ok(Some(summary))
}

/// Prices of 2-bath, 2-or-3-bed listings for every month up to `end_month`,
/// optionally with IQR outliers removed.
pub fn get_monthly_price(
    conn: &Connection,
    cities: &[&str],
    end_month: &str,
    remove_outliers: bool,
) -> Result<Option<Vec<MonthlyPrice>>, ServerError> {
    let Some(BuiltQuery { sql, params }) = monthly_price_sql(cities, end_month) else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<f64>>(1)?,
        ))
    })?;

    let mut prices = Vec::new();
    for r in rows {
        if let (Some(month), Some(price)) = r? {
            prices.push(MonthlyPrice { month, price });
        }
    }

    if remove_outliers {
        prices = remove_iqr_outliers(prices, |p| p.price);
    }
    Ok(Some(prices))
}

pub fn count_month_rows(conn: &Connection, month: &str) -> Result<i64, ServerError> {
    let n = conn.query_row(
        "select count(*) from city_housing where crawled_date = ?",
        params![month],
        |r| r.get(0),
    )?;
    Ok(n)
}

pub fn insert_listing(conn: &Connection, l: &NewListing) -> Result<(), ServerError> {
    conn.execute(
        r#"
        INSERT INTO city_housing (
            crawled_date, house_address, price, area, num_bathroom, num_bedroom,
            num_days_posted, zillow_url, house_lat, house_lng, city_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            l.crawled_date,
            l.address,
            l.price,
            l.area,
            l.bathrooms,
            l.bedrooms,
            l.days_posted,
            l.url,
            l.lat,
            l.lng,
            l.city_id
        ],
    )
    .map_err(|e| ServerError::DbError(format!("Insert listing failed: {e}")))?;
    Ok(())
}
