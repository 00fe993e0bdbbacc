use crate::analysis::stats::{iqr_fences, percentile_midpoint};
use crate::db::housing::{analysis_query, get_housing, get_monthly_price};
use crate::db::layout::{get_layout, insert_landmarks};
use crate::db::query_builder::{city_clause, housing_query, BuiltQuery};
use crate::domain::filter::HousingFilter;
use crate::domain::landmark::{Landmark, LandmarkType};
use crate::domain::listing::format_thousands;
use crate::tests::utils::{init_test_db, listing, seed};

const PRINCETON_AREA: [&str; 3] = ["Princeton,NJ", "West Windsor,NJ", "Lawrence,NJ"];

#[test]
fn city_clause_accepts_only_one_or_three_cities() {
    assert!(city_clause(&["NYC,NY"]).is_some());
    assert!(city_clause(&PRINCETON_AREA).is_some());
    assert!(city_clause(&[]).is_none());
    assert!(city_clause(&["NYC,NY", "Seattle,WA"]).is_none());
    assert!(city_clause(&["a", "b", "c", "d"]).is_none());
}

#[test]
fn filters_are_appended_to_the_housing_query() {
    let filter = HousingFilter {
        bedrooms: Some((2, 3)),
        bathrooms: Some((1, 2)),
        max_days_posted: Some(30),
        price_per_area: true,
    };
    let BuiltQuery { sql, params } = housing_query(&["NYC,NY"], "2022-11", &filter).unwrap();

    assert!(sql.contains("num_bedroom between 2 and 3"));
    assert!(sql.contains("num_bathroom between 1 and 2"));
    assert!(sql.contains("num_days_posted <= 30"));
    assert!(sql.contains("price * 1.0 / area"));
    assert_eq!(params, vec!["NYC,NY".to_string(), "2022-11".to_string()]);
}

#[test]
fn queries_return_none_for_bad_city_counts() {
    let (_dir, db) = init_test_db();
    db.with_conn(|conn| {
        let f = HousingFilter::default();
        assert!(get_housing(conn, &["NYC,NY", "Seattle,WA"], "2022-11", &f)?.is_none());
        assert!(analysis_query(conn, &[], "2022-11", &f)?.is_none());
        assert!(get_monthly_price(conn, &["a", "b"], "2022-11", true)?.is_none());
        assert!(get_layout(conn, LandmarkType::School, &["a", "b"])?.is_none());

        assert!(get_housing(conn, &["NYC,NY"], "2022-11", &f)?.is_some());
        assert!(analysis_query(conn, &PRINCETON_AREA, "2022-11", &f)?.is_some());
        assert!(get_monthly_price(conn, &PRINCETON_AREA, "2022-11", true)?.is_some());
        assert!(get_layout(conn, LandmarkType::School, &["NYC,NY"])?.is_some());
        Ok(())
    })
    .unwrap();
}

#[test]
fn housing_is_scoped_to_cities_and_month() {
    let (_dir, db) = init_test_db();
    seed(
        &db,
        &[
            listing(1, "2022-11", 500_000.0, 3.0, 2.0),
            listing(2, "2022-11", 600_000.0, 3.0, 2.0),
            listing(5, "2022-11", 900_000.0, 2.0, 1.0),
            listing(1, "2022-10", 450_000.0, 3.0, 2.0),
        ],
    );

    let points = db
        .with_conn(|conn| get_housing(conn, &PRINCETON_AREA, "2022-11", &HousingFilter::default()))
        .unwrap()
        .unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points.prices, vec![Some(500_000.0), Some(600_000.0)]);
    assert_eq!(points.lats.len(), points.urls.len());
}

#[test]
fn bedroom_and_days_filters_narrow_results() {
    let (_dir, db) = init_test_db();
    let mut old = listing(4, "2022-11", 700_000.0, 4.0, 2.0);
    old.days_posted = Some(90);
    seed(
        &db,
        &[
            listing(4, "2022-11", 400_000.0, 1.0, 1.0),
            listing(4, "2022-11", 600_000.0, 3.0, 2.0),
            old,
        ],
    );

    let filter = HousingFilter {
        bedrooms: Some((2, 5)),
        max_days_posted: Some(30),
        ..HousingFilter::default()
    };
    let points = db
        .with_conn(|conn| get_housing(conn, &["Seattle,WA"], "2022-11", &filter))
        .unwrap()
        .unwrap();
    assert_eq!(points.prices, vec![Some(600_000.0)]);
}

#[test]
fn price_per_area_divides_by_area() {
    let (_dir, db) = init_test_db();
    let mut no_area = listing(5, "2022-11", 800_000.0, 2.0, 1.0);
    no_area.area = None;
    seed(&db, &[listing(5, "2022-11", 500_000.0, 2.0, 1.0), no_area]);

    let filter = HousingFilter {
        price_per_area: true,
        ..HousingFilter::default()
    };
    let points = db
        .with_conn(|conn| get_housing(conn, &["NYC,NY"], "2022-11", &filter))
        .unwrap()
        .unwrap();
    assert_eq!(points.prices, vec![Some(500.0), None]);
}

#[test]
fn analysis_groups_by_bedrooms_and_bathrooms() {
    let (_dir, db) = init_test_db();
    let mut missing_baths = listing(4, "2022-11", 1_000_000.0, 3.0, 2.0);
    missing_baths.bathrooms = None;
    seed(
        &db,
        &[
            listing(4, "2022-11", 500_000.0, 3.0, 2.0),
            listing(4, "2022-11", 700_000.0, 3.0, 2.5),
            listing(4, "2022-11", 600_000.0, 3.0, 2.0),
            listing(4, "2022-11", 300_000.0, 1.0, 1.0),
            listing(4, "2022-11", 250_000.0, 0.0, 1.0),
            missing_baths,
        ],
    );

    let rows = db
        .with_conn(|conn| analysis_query(conn, &["Seattle,WA"], "2022-11", &HousingFilter::default()))
        .unwrap()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].bedrooms, rows[0].bathrooms), (1, 1));
    assert_eq!((rows[1].bedrooms, rows[1].bathrooms), (3, 2));
    assert_eq!(rows[1].min, 500_000.0);
    assert_eq!(rows[1].max, 700_000.0);
    assert_eq!(rows[1].median, 600_000.0);
    assert_eq!(format_thousands(rows[1].median), "$600.0k");
}

#[test]
fn monthly_price_keeps_two_bath_listings_up_to_end_month() {
    let (_dir, db) = init_test_db();
    seed(
        &db,
        &[
            listing(5, "2022-10", 500_000.0, 2.0, 2.0),
            listing(5, "2022-11", 550_000.0, 3.0, 2.0),
            listing(5, "2022-11", 520_000.0, 4.0, 2.0),
            listing(5, "2022-11", 530_000.0, 2.0, 1.0),
            listing(5, "2022-12", 560_000.0, 2.0, 2.0),
        ],
    );

    let prices = db
        .with_conn(|conn| get_monthly_price(conn, &["NYC,NY"], "2022-11", false))
        .unwrap()
        .unwrap();
    let months: Vec<&str> = prices.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, vec!["2022-10", "2022-11"]);
}

#[test]
fn monthly_price_drops_iqr_outliers() {
    let (_dir, db) = init_test_db();
    let mut rows: Vec<_> = [400.0, 410.0, 420.0, 430.0, 440.0, 450.0, 460.0, 470.0]
        .iter()
        .map(|k| listing(5, "2022-11", k * 1000.0, 2.0, 2.0))
        .collect();
    rows.push(listing(5, "2022-11", 5_000_000.0, 2.0, 2.0));
    seed(&db, &rows);

    let kept = db
        .with_conn(|conn| get_monthly_price(conn, &["NYC,NY"], "2022-11", true))
        .unwrap()
        .unwrap();
    assert_eq!(kept.len(), 8);
    assert!(kept.iter().all(|p| p.price < 1_000_000.0));
}

#[test]
fn midpoint_percentile_matches_hand_computation() {
    let v = [1.0, 2.0, 3.0, 4.0];
    // rank 0.75 -> midpoint of 1 and 2
    assert_eq!(percentile_midpoint(&v, 25.0), Some(1.5));
    // rank 2.25 -> midpoint of 3 and 4
    assert_eq!(percentile_midpoint(&v, 75.0), Some(3.5));
    assert_eq!(percentile_midpoint(&[7.0], 25.0), Some(7.0));
    assert_eq!(percentile_midpoint(&[], 50.0), None);
}

#[test]
fn constant_prices_have_no_fences() {
    assert!(iqr_fences(&[5.0, 5.0, 5.0, 5.0]).is_none());
}

#[test]
fn layout_returns_landmarks_of_one_type() {
    let (_dir, db) = init_test_db();
    let landmarks = vec![
        Landmark {
            name: "Princeton High School".into(),
            kind: LandmarkType::School,
            lat: 40.35,
            lng: -74.67,
            rating: 4.1,
            city_id: 1,
        },
        Landmark {
            name: "Princeton Junction".into(),
            kind: LandmarkType::TrainStation,
            lat: 40.31,
            lng: -74.62,
            rating: 0.0,
            city_id: 2,
        },
        Landmark {
            name: "Seattle Central".into(),
            kind: LandmarkType::School,
            lat: 47.6,
            lng: -122.3,
            rating: 3.9,
            city_id: 4,
        },
    ];
    db.with_conn(|conn| insert_landmarks(conn, &landmarks)).unwrap();

    let schools = db
        .with_conn(|conn| get_layout(conn, LandmarkType::School, &PRINCETON_AREA))
        .unwrap()
        .unwrap();
    assert_eq!(schools.names, vec!["Princeton High School".to_string()]);
    assert_eq!(schools.lats, vec![40.35]);
    assert_eq!(schools.lons, vec![-74.67]);
}
