// Library crate; main.rs and the integration tests both build on it.

pub mod canned;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod routes;
pub mod schema;
pub mod server;
pub mod service;
pub mod settings;
pub mod state;
pub mod validation;
