pub mod config;
pub mod models;
pub mod planner;
pub mod summarize;
