pub mod auth_jwt;
pub mod config;
pub mod db;
pub mod db_models;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
pub mod validations;
