pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod rates;
pub mod recommendation;
pub mod routes;
pub mod state;
