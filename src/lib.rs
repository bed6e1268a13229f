pub mod client;
pub mod config;
pub mod error;
pub mod languages;
pub mod routes;
pub mod state;
pub mod translate;
