pub mod configuration;
pub mod domain;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
