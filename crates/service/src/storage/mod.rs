//! Storage backends for the service layer that are not SQL.

pub mod ship_file_store;
