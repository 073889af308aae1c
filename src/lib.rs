pub mod analysis;
pub mod api;
pub mod app;
pub mod config;
pub mod dataset;
pub mod importers;
pub mod services;
pub mod states;
pub mod utils;
