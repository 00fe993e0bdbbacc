use crate::analysis::census::{get_census_data, SHOWN_FACTS, SHOWN_LOCATIONS};
use std::fs;

#[test]
fn census_table_has_shown_facts_by_location() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("princeton.csv"),
        "Fact,Fact Note,\"Princeton, New Jersey\",Value Note for Princeton\n\
         \"Population Estimates, July 1 2021, (V2021)\",,\"30,681\",\n\
         \"Median household income (in 2020 dollars), 2016-2020\",,\"$186,723\",\n\
         Some fact we do not show,,12,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("us.csv"),
        "Fact,United States\n\
         \"Population Estimates, July 1 2021, (V2021)\",\"331,893,745\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let table = get_census_data(dir.path()).unwrap();

    assert_eq!(table.locations, SHOWN_LOCATIONS.to_vec());
    assert_eq!(table.rows.len(), SHOWN_FACTS.len());

    let (fact, population) = &table.rows[0];
    assert_eq!(fact, SHOWN_FACTS[0]);
    assert_eq!(population, &vec!["30,681".to_string(), String::new(), String::new(), "331,893,745".to_string()]);

    let (_, income) = &table.rows[7];
    assert_eq!(income[0], "$186,723");
}

#[test]
fn missing_census_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(get_census_data(&dir.path().join("nope")).is_err());
}
