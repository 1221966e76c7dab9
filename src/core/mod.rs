pub mod app;
pub mod config;
pub mod history;
pub mod paths;
pub mod segment;
pub mod transcript;
