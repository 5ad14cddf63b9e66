pub mod config;
pub mod db;
pub mod errors;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod structs;
pub mod utils;
