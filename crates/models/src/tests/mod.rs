/// Ship entity against a live Postgres, skipped without one
pub mod ship_db_tests;
