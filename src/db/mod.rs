pub mod connection;
pub mod migrations;
pub mod plan_repo;
pub mod step_repo;

pub use connection::*;
