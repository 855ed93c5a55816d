pub mod address;
pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod explorer;
pub mod fees;
pub mod first_activity;
pub mod lookup_stats;
pub mod models;
pub mod rotator;
pub mod share;
