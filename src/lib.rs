pub mod config;
pub mod data_models;
pub mod db;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod target;
