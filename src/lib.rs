pub mod config_handler;
pub mod rest_client;
pub mod models;
pub mod field_extractor;
pub mod stats_service;
pub mod team_service;
pub mod fixture_service;
pub mod row_builder;
pub mod csv_writer;
pub mod fetch_service;
