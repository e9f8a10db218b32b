pub mod app;
pub mod config;
pub mod controller;
pub mod format;
pub mod market_data;
pub mod render;
pub mod telemetry;
pub mod view;
