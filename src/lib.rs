pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod headless;
pub mod render;
pub mod table;
pub mod ui;
pub mod view;
