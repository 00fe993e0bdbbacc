mod census_tests;
mod gmap_tests;
mod ingest_tests;
mod query_tests;
mod utils;
