/// Shared modules for the energy index dashboards
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod history;
pub mod metrics;
pub mod types;
pub mod view;
pub mod widget;
