pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod planner;
