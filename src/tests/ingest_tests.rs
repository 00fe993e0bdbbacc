use crate::db::housing::count_month_rows;
use crate::ingest::parse::{city_slug, parse_days_on_market, parse_lat_long};
use crate::ingest::{update_db_monthly, IngestOutcome};
use crate::tests::utils::init_test_db;
use std::fs;
use std::path::Path;

const HEADER: &str =
    "zpid,crawled_month,addressStreet,unformattedPrice,area,baths,beds,detailUrl,latLong,variableData";

fn write_crawl(data_dir: &Path, month: &str, slug: &str, rows: &[&str]) {
    let dir = data_dir.join(month);
    fs::create_dir_all(&dir).unwrap();
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(dir.join(format!("{slug}{month}.csv")), body).unwrap();
}

fn row(id: u32, price: &str, days: &str) -> String {
    format!(
        r#"{id},2022-11,{id} Nassau St,{price},1500,2,3,https://www.zillow.com/homedetails/{id}_zpid/,"{{'latitude': 40.35, 'longitude': -74.66}}","{days}""#
    )
}

#[test]
fn lat_long_is_read_from_python_style_dict() {
    assert_eq!(
        parse_lat_long("{'latitude': 40.357, 'longitude': -74.667}"),
        (Some(40.357), Some(-74.667))
    );
    assert_eq!(parse_lat_long("{}"), (None, None));
    assert_eq!(parse_lat_long("not a dict"), (None, None));
}

#[test]
fn days_on_market_comes_from_the_text_token() {
    assert_eq!(
        parse_days_on_market("{'type': 'DAYS_ON', 'text': '3 days on Zillow'}"),
        Some(3)
    );
    assert_eq!(
        parse_days_on_market("{'type': 'DAYS_ON', 'text': '27 days on Zillow'}"),
        Some(27)
    );
    assert_eq!(parse_days_on_market("{'type': 'OPEN_HOUSE', 'text': 'Open: Sat'}"), None);
    assert_eq!(parse_days_on_market(""), None);
}

#[test]
fn city_slug_is_the_file_name_before_the_month() {
    assert_eq!(city_slug("seattle2022-11.csv", "2022-11"), "seattle");
    assert_eq!(
        city_slug("west-windsor-township-nj2022-11.csv", "2022-11"),
        "west-windsor-township-nj"
    );
    assert_eq!(city_slug("nyc_2022-11.csv", "2022-11"), "nyc");
}

#[test]
fn monthly_load_inserts_rows_per_city() {
    let (dir, db) = init_test_db();
    let data = dir.path().join("crawled_data");
    let dom = "{'type': 'DAYS_ON', 'text': '12 days on Zillow'}";
    write_crawl(&data, "2022-11", "princeton", &[&row(1, "650000", dom), &row(2, "", "")]);
    write_crawl(&data, "2022-11", "nyc", &[&row(3, "999000", dom)]);

    let outcome = update_db_monthly(&db, &data, "2022-11").unwrap();
    assert_eq!(outcome.inserted_rows(), 3);
    assert_eq!(
        outcome,
        IngestOutcome::Inserted(vec![
            ("NYC,NY".to_string(), 1),
            ("Princeton,NJ".to_string(), 2),
        ])
    );

    let (days, lat, price): (Option<i64>, Option<f64>, Option<f64>) = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "select num_days_posted, house_lat, price from city_housing where house_address = '1 Nassau St'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )?)
        })
        .unwrap();
    assert_eq!(days, Some(12));
    assert_eq!(lat, Some(40.35));
    assert_eq!(price, Some(650_000.0));

    let empty_price: Option<f64> = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "select price from city_housing where house_address = '2 Nassau St'",
                [],
                |r| r.get(0),
            )?)
        })
        .unwrap();
    assert_eq!(empty_price, None);
}

#[test]
fn rerunning_a_month_is_a_no_op() {
    let (dir, db) = init_test_db();
    let data = dir.path().join("crawled_data");
    write_crawl(&data, "2022-11", "seattle", &[&row(1, "700000", ""), &row(2, "710000", "")]);

    update_db_monthly(&db, &data, "2022-11").unwrap();
    let before = db.with_conn(|conn| count_month_rows(conn, "2022-11")).unwrap();

    let again = update_db_monthly(&db, &data, "2022-11").unwrap();
    let after = db.with_conn(|conn| count_month_rows(conn, "2022-11")).unwrap();

    assert_eq!(again, IngestOutcome::AlreadyIngested { existing: 2 });
    assert_eq!(before, after);
}

#[test]
fn missing_month_directory_changes_nothing() {
    let (dir, db) = init_test_db();
    let data = dir.path().join("crawled_data");

    let outcome = update_db_monthly(&db, &data, "2023-01").unwrap();
    assert!(matches!(outcome, IngestOutcome::MissingDirectory(_)));
    assert_eq!(db.with_conn(|conn| count_month_rows(conn, "2023-01")).unwrap(), 0);
}

#[test]
fn unknown_city_files_are_skipped() {
    let (dir, db) = init_test_db();
    let data = dir.path().join("crawled_data");
    write_crawl(&data, "2022-11", "boston", &[&row(1, "700000", "")]);
    write_crawl(&data, "2022-11", "seattle", &[&row(2, "710000", "")]);

    let outcome = update_db_monthly(&db, &data, "2022-11").unwrap();
    assert_eq!(outcome, IngestOutcome::Inserted(vec![("Seattle,WA".to_string(), 1)]));
}
