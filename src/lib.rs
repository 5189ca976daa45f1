pub mod common;
pub mod config;
pub mod imagery;
pub mod routes;
