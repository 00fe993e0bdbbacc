use crate::domain::city::{city_by_name, CITIES};
use crate::domain::landmark::LandmarkType;
use crate::gmap::places::{merge_page, NearbyResponse};
use crate::gmap::{layout_types_for, LandmarkMap};

const PAGE: &str = r#"{
    "html_attributions": [],
    "next_page_token": "AW30NDz",
    "results": [
        { "name": "Princeton High School",
          "geometry": { "location": { "lat": 40.3571, "lng": -74.6711 } },
          "rating": 4.2 },
        { "name": "Riverside School",
          "geometry": { "location": { "lat": 40.3469, "lng": -74.6420 } } }
    ],
    "status": "OK"
}"#;

#[test]
fn nearby_page_is_merged_by_name() {
    let page: NearbyResponse = serde_json::from_str(PAGE).unwrap();
    assert_eq!(page.next_page_token.as_deref(), Some("AW30NDz"));

    let princeton = city_by_name("Princeton,NJ").unwrap();
    let mut acc = LandmarkMap::new();
    merge_page(&mut acc, &page, LandmarkType::School, princeton);
    assert_eq!(acc.len(), 2);
    assert_eq!(acc["Riverside School"].rating, 0.0);
    assert_eq!(acc["Princeton High School"].city_id, 1);

    // Same name from a neighbouring town replaces the earlier entry.
    let ww = city_by_name("West Windsor,NJ").unwrap();
    merge_page(&mut acc, &page, LandmarkType::School, ww);
    assert_eq!(acc.len(), 2);
    assert_eq!(acc["Princeton High School"].city_id, 2);
}

#[test]
fn subway_stations_only_where_there_is_a_subway() {
    for city in CITIES {
        let types = layout_types_for(city);
        assert_eq!(types.contains(&LandmarkType::SubwayStation), city.has_subway);
        assert!(types.contains(&LandmarkType::School));
    }
    assert_eq!(layout_types_for(city_by_name("NYC,NY").unwrap()).len(), 6);
}
